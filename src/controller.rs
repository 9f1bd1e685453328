//! 视图控制器
//!
//! 每个页面一个控制器，持有服务端数据在本地的镜像，通过 `AuthGuard` 发请求，
//! 以 `StateCell` 暴露状态供渲染层订阅。所有控制器都可以廉价克隆。

pub mod auth;
pub mod friends;
pub mod overview;
pub mod posts;
pub mod profile;
pub mod requests;
pub mod settings;
pub mod shell;

pub use auth::{LoginController, SignupController};
pub use friends::{AddFriendsController, FriendsController};
pub use overview::{OverviewController, OverviewData};
pub use posts::PostsController;
pub use profile::ProfileController;
pub use requests::RequestsController;
pub use settings::SettingsController;
pub use shell::{ShellController, ShellData, Theme};

/// 表单校验失败的通用提示
pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";
