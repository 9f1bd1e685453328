use leptos::prelude::*;
use maxi_shared::WeeklyPoint;

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 220.0;
const PADDING: f64 = 24.0;

// 把每周关注数映射为 SVG 坐标
fn plot(points: &[WeeklyPoint]) -> Vec<(f64, f64)> {
    let max = points.iter().map(|p| p.followers).max().unwrap_or(0).max(1) as f64;
    let step = if points.len() > 1 {
        (WIDTH - 2.0 * PADDING) / (points.len() - 1) as f64
    } else {
        0.0
    };

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = PADDING + step * i as f64;
            let y = HEIGHT - PADDING - (p.followers as f64 / max) * (HEIGHT - 2.0 * PADDING);
            (x, y)
        })
        .collect()
}

/// 每周关注者折线图
#[component]
pub fn FollowersChart(points: Vec<WeeklyPoint>) -> impl IntoView {
    if points.is_empty() {
        return view! { <p class="text-base-content/60">"No follower data yet"</p> }.into_any();
    }

    let coords = plot(&points);
    let line = coords
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");

    let labels = points
        .iter()
        .zip(&coords)
        .map(|(point, (x, y))| {
            let (x, y) = (format!("{x:.1}"), format!("{y:.1}"));
            view! {
                <g>
                    <circle cx=x.clone() cy=y r="4" class="fill-primary" />
                    <text x=x y=format!("{}", HEIGHT - 4.0) text-anchor="middle" class="text-xs fill-current">
                        {point.name.clone()}
                    </text>
                </g>
            }
        })
        .collect_view();

    view! {
        <svg viewBox=format!("0 0 {WIDTH} {HEIGHT}") class="w-full h-56">
            <polyline points=line fill="none" stroke="currentColor" stroke-width="2" class="text-primary" />
            {labels}
        </svg>
    }
    .into_any()
}
