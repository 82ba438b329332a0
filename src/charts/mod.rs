//! Charts module - static chart rendering

mod renderer;

pub use renderer::StaticChartRenderer;
