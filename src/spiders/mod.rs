pub mod onefootball;

pub use onefootball::OneFootballSpider;
