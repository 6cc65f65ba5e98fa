//! Vehicle and search parameters for stop planning.

/// Upper bound on extra radii tried by [`GapPolicy::ExpandRadius`].
pub const MAX_RADIUS_STEPS: usize = 64;

/// What to do when a threshold crossing finds no station in range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GapPolicy {
    /// Record nothing for the missed threshold and keep driving.
    #[default]
    Skip,

    /// Retry with the radius grown by `step_miles` until a station is found
    /// or the radius would exceed `max_radius_miles`, then skip.
    ExpandRadius { step_miles: f64, max_radius_miles: f64 },

    /// Abort the plan.
    Fail,
}

/// Configuration parameters for stop planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Distance the vehicle covers on a full tank (miles).
    pub range_miles: f64,

    /// Fuel economy (miles per gallon).
    pub mpg: f64,

    /// How far from a threshold crossing to look for stations (miles).
    pub search_radius_miles: f64,

    /// Behaviour when no station is within the search radius.
    pub gap_policy: GapPolicy,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(range_miles: f64, mpg: f64, search_radius_miles: f64) -> Self {
        Self {
            range_miles,
            mpg,
            search_radius_miles,
            gap_policy: GapPolicy::default(),
        }
    }

    /// Set the gap policy.
    pub fn with_gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.gap_policy = gap_policy;
        self
    }

    /// Gallons bought at each stop: a full range's worth.
    pub fn gallons_per_stop(&self) -> f64 {
        self.range_miles / self.mpg
    }

    /// Radii to try at a crossing, smallest first.
    ///
    /// Expansion adds at most [`MAX_RADIUS_STEPS`] radii. A step that is not
    /// positive and finite, or a maximum below the base radius, adds none.
    pub(super) fn search_radii(&self) -> Vec<f64> {
        let base = self.search_radius_miles;
        let mut radii = vec![base];

        if let GapPolicy::ExpandRadius {
            step_miles,
            max_radius_miles,
        } = self.gap_policy
        {
            if !(step_miles.is_finite() && step_miles > 0.0) || max_radius_miles.is_nan() {
                return radii;
            }

            let steps = ((max_radius_miles - base) / step_miles).floor();
            if steps < 1.0 {
                return radii;
            }
            let steps = steps.min(MAX_RADIUS_STEPS as f64) as usize;

            for k in 1..=steps {
                let radius = base + step_miles * k as f64;
                if radius > max_radius_miles {
                    break;
                }
                if radii.last().is_some_and(|&last| radius > last) {
                    radii.push(radius);
                }
            }
        }

        radii
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            range_miles: 500.0,
            mpg: 10.0,
            search_radius_miles: 50.0,
            gap_policy: GapPolicy::Skip,
        }
    }
}
