//! Arrival generation.
use chrono::Weekday;

use crate::patient::Patient;

/// Produces the patients arriving on a given simulated day.
pub trait PatientSource {
    fn generate(&mut self, day_num: usize, day: Weekday) -> Vec<Patient>;
}

/// A fixed number of arrivals on selected weekdays, with monotonically
/// increasing patient ids.
pub struct SteadyArrivals {
    per_day: usize,
    on: Vec<Weekday>,
    next_id: u64,
}

impl SteadyArrivals {
    pub fn new(per_day: usize, on: Vec<Weekday>) -> Self {
        Self {
            per_day,
            on,
            next_id: 0,
        }
    }

    pub fn every_day(per_day: usize) -> Self {
        Self::new(
            per_day,
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
        )
    }
}

impl PatientSource for SteadyArrivals {
    fn generate(&mut self, _day_num: usize, day: Weekday) -> Vec<Patient> {
        if !self.on.contains(&day) {
            return Vec::new();
        }
        (0..self.per_day)
            .map(|_| {
                let id = self.next_id;
                self.next_id += 1;
                Patient::new(id)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_only_on_selected_days() {
        let mut arrivals = SteadyArrivals::new(3, vec![Weekday::Mon]);
        assert_eq!(arrivals.generate(0, Weekday::Mon).len(), 3);
        assert!(arrivals.generate(1, Weekday::Tue).is_empty());
        let next_batch = arrivals.generate(7, Weekday::Mon);
        assert_eq!(next_batch[0].id, 3);
    }
}
