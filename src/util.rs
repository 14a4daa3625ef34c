mod cached;
mod roulette;

pub use cached::Cached;
pub use roulette::RouletteWheel;
