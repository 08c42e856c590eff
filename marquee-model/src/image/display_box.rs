/// A requested bounding box in layout units.
///
/// Either axis may be `f64::INFINITY`, meaning the layout does not constrain
/// that axis. Non-positive or NaN values are accepted but carry no usable
/// aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayBox {
    pub width: f64,
    pub height: f64,
}

impl DisplayBox {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A box constrained on neither axis.
    pub const fn unbounded() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY)
    }

    /// Builds a box from optional desired dimensions; a missing axis is
    /// unbounded.
    pub fn from_desired(width: Option<f64>, height: Option<f64>) -> Self {
        Self::new(
            width.unwrap_or(f64::INFINITY),
            height.unwrap_or(f64::INFINITY),
        )
    }

    pub fn is_width_unbounded(&self) -> bool {
        self.width == f64::INFINITY
    }

    pub fn is_height_unbounded(&self) -> bool {
        self.height == f64::INFINITY
    }

    /// True when at least one axis is unconstrained.
    pub fn is_unbounded(&self) -> bool {
        self.is_width_unbounded() || self.is_height_unbounded()
    }

    /// Width over height, or `None` when either axis is unbounded,
    /// non-positive or NaN.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        (usable(self.width) && usable(self.height))
            .then(|| self.width / self.height)
    }
}

impl Default for DisplayBox {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayBox;

    #[test]
    fn ratio_requires_positive_finite_axes() {
        assert_eq!(DisplayBox::new(300.0, 200.0).aspect_ratio(), Some(1.5));
        assert_eq!(DisplayBox::new(0.0, 200.0).aspect_ratio(), None);
        assert_eq!(DisplayBox::new(-300.0, 200.0).aspect_ratio(), None);
        assert_eq!(DisplayBox::new(f64::NAN, 200.0).aspect_ratio(), None);
        assert_eq!(DisplayBox::new(300.0, f64::INFINITY).aspect_ratio(), None);
    }

    #[test]
    fn missing_desired_axes_are_unbounded() {
        let boxed = DisplayBox::from_desired(Some(400.0), None);
        assert!(!boxed.is_width_unbounded());
        assert!(boxed.is_height_unbounded());
        assert!(boxed.is_unbounded());
        assert!(!DisplayBox::new(1.0, 1.0).is_unbounded());
    }

    #[test]
    fn negative_infinity_is_not_unbounded() {
        assert!(!DisplayBox::new(f64::NEG_INFINITY, 10.0).is_unbounded());
    }
}
