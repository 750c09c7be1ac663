/// Running sum whose total does not depend on the order contributions
/// arrived in.
///
/// Float addition is not associative, so contributions are kept and summed
/// smallest first when the total is requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    parts: Vec<f64>,
}

impl Tally {
    pub fn add(&mut self, amount: f64) {
        self.parts.push(amount);
    }

    pub fn total(&self) -> f64 {
        let mut parts = self.parts.clone();
        parts.sort_by(f64::total_cmp);
        parts.into_iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl FromIterator<f64> for Tally {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Tally {
            parts: iter.into_iter().collect(),
        }
    }
}
