pub mod svg;

pub use svg::SVG;
