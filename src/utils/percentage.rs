use std::{fmt::Display, ops::Deref};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Share of `count` in `whole`. An empty whole is treated as 0%.
pub fn count_percentage(count: usize, whole: usize) -> Percentage {
    if whole == 0 {
        return Percentage(0.);
    }
    Percentage(count as f64 / whole as f64 * 100.)
}
