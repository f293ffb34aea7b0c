/// Physical spring parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = bouncy.
    pub damping_ratio: f64,
    pub stiffness: f64,
    pub velocity_threshold: f64,
    pub position_threshold: f64,
}

impl SpringSpec {
    /// Soft, slightly bouncy spring used for zoom level changes.
    pub fn medium_bouncy_low() -> Self {
        Self {
            damping_ratio: 0.5,
            stiffness: 200.0,
            velocity_threshold: 0.001,
            position_threshold: 0.0005,
        }
    }

    /// Critically damped spring used for list scrolling, thresholds in pixels.
    pub fn no_bouncy_medium() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.5,
            position_threshold: 0.5,
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::medium_bouncy_low()
    }
}

/// A scalar that springs toward its target one frame at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringValue {
    value: f64,
    velocity: f64,
    target: f64,
    spec: SpringSpec,
}

impl SpringValue {
    pub fn new(value: f64, spec: SpringSpec) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            spec,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn animate_to(&mut self, target: f64) {
        self.target = target;
    }

    pub fn snap_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        self.velocity == 0.0 && self.value == self.target
    }

    /// Advances by `dt` seconds. Returns whether the value is still moving.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.is_settled() {
            return false;
        }

        let SpringSpec {
            damping_ratio,
            stiffness,
            velocity_threshold,
            position_threshold,
        } = self.spec;

        let displacement = self.value - self.target;
        let damping = 2.0 * damping_ratio * stiffness.sqrt();
        let accel = -stiffness * displacement - damping * self.velocity;
        self.velocity += accel * dt;
        self.value += self.velocity * dt;

        if self.velocity.abs() < velocity_threshold
            && (self.value - self.target).abs() < position_threshold
        {
            self.snap_to(self.target);
            return false;
        }
        true
    }
}
