//! Keyframe-free value animation.
//!
//! Animations are generic over [`Animatable`], a small arithmetic capability
//! implemented for `f32` and the glam vector types. An [`Animation`] owns its
//! current value and advances it by a time step on each call to
//! [`Animation::animate`].
//!
//! ```
//! use ember_core::animation::{Animation, LinearAnimation};
//! use ember_core::math::Vec3;
//!
//! let mut anim = LinearAnimation::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 2.0);
//! assert_eq!(anim.animate(1.0), Vec3::new(5.0, 0.0, 0.0));
//! assert_eq!(anim.animate(5.0), Vec3::new(10.0, 0.0, 0.0));
//! assert!(anim.is_finished());
//! ```

use crate::math::{Vec2, Vec3, Vec4};

/// Arithmetic needed to interpolate a value.
pub trait Animatable: Copy {
    fn add(self, other: Self) -> Self;
    fn sub(self, other: Self) -> Self;
    fn scale(self, factor: f32) -> Self;
    fn length_squared(self) -> f32;
    fn zero() -> Self;

    fn length(self) -> f32 {
        self.length_squared().sqrt()
    }
}

impl Animatable for f32 {
    fn add(self, other: Self) -> Self {
        self + other
    }

    fn sub(self, other: Self) -> Self {
        self - other
    }

    fn scale(self, factor: f32) -> Self {
        self * factor
    }

    fn length_squared(self) -> f32 {
        self * self
    }

    fn zero() -> Self {
        0.0
    }
}

macro_rules! impl_animatable_vec {
    ($($ty:ty),*) => {
        $(
            impl Animatable for $ty {
                fn add(self, other: Self) -> Self {
                    self + other
                }

                fn sub(self, other: Self) -> Self {
                    self - other
                }

                fn scale(self, factor: f32) -> Self {
                    self * factor
                }

                fn length_squared(self) -> f32 {
                    <$ty>::length_squared(self)
                }

                fn zero() -> Self {
                    <$ty>::ZERO
                }
            }
        )*
    };
}

impl_animatable_vec!(Vec2, Vec3, Vec4);

/// Errors raised when configuring an animation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Deceleration rate must be strictly positive.
    InvalidDecelerationRate(f32),
}

impl std::fmt::Display for AnimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimationError::InvalidDecelerationRate(rate) => {
                write!(f, "Deceleration rate must be greater than 0 (got {})", rate)
            }
        }
    }
}

impl std::error::Error for AnimationError {}

/// A value that changes over time.
pub trait Animation<T: Animatable> {
    fn current(&self) -> T;

    fn set_current(&mut self, value: T);

    /// Advance by `time_step` seconds and return the new current value.
    fn animate(&mut self, time_step: f32) -> T;
}

/// Moves `current` toward `target` at constant speed, arriving when
/// `time_left` reaches zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearAnimation<T> {
    current: T,
    target: T,
    time_left: f32,
}

impl<T: Animatable> LinearAnimation<T> {
    pub fn new(current: T, target: T, duration: f32) -> Self {
        Self {
            current,
            target,
            time_left: duration.max(0.0),
        }
    }

    pub fn target(&self) -> T {
        self.target
    }

    /// Retarget the animation; the remaining time restarts at `duration`.
    pub fn set_target(&mut self, target: T, duration: f32) {
        self.target = target;
        self.time_left = duration.max(0.0);
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn is_finished(&self) -> bool {
        self.time_left <= 0.0
    }
}

impl<T: Animatable> Animation<T> for LinearAnimation<T> {
    fn current(&self) -> T {
        self.current
    }

    fn set_current(&mut self, value: T) {
        self.current = value;
    }

    fn animate(&mut self, time_step: f32) -> T {
        if self.time_left <= 0.0 {
            self.current = self.target;
            return self.current;
        }

        let step = time_step.clamp(0.0, self.time_left);
        let fraction = step / self.time_left;
        self.time_left -= step;

        let delta = self.target.sub(self.current).scale(fraction);
        self.current = self.current.add(delta);
        self.current
    }
}

/// Treats `current` as a velocity and shrinks it by `rate` units per second
/// until it reaches zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecelerationAnimation<T> {
    current: T,
    rate: f32,
}

impl<T: Animatable> DecelerationAnimation<T> {
    pub fn new(velocity: T) -> Self {
        Self {
            current: velocity,
            rate: 1.0,
        }
    }

    pub fn with_rate(velocity: T, rate: f32) -> Result<Self, AnimationError> {
        let mut anim = Self::new(velocity);
        anim.set_deceleration_rate(rate)?;
        Ok(anim)
    }

    pub fn deceleration_rate(&self) -> f32 {
        self.rate
    }

    pub fn set_deceleration_rate(&mut self, rate: f32) -> Result<(), AnimationError> {
        // `!(rate > 0.0)` also rejects NaN
        if !(rate > 0.0) {
            return Err(AnimationError::InvalidDecelerationRate(rate));
        }
        self.rate = rate;
        Ok(())
    }

    pub fn is_stopped(&self) -> bool {
        self.current.length_squared() == 0.0
    }
}

impl<T: Animatable> Animation<T> for DecelerationAnimation<T> {
    fn current(&self) -> T {
        self.current
    }

    fn set_current(&mut self, value: T) {
        self.current = value;
    }

    fn animate(&mut self, time_step: f32) -> T {
        let length_squared = self.current.length_squared();
        if length_squared == 0.0 {
            return self.current;
        }

        let length = length_squared.sqrt();
        let amount = self.rate * time_step.max(0.0);
        if amount >= length {
            self.current = T::zero();
            return self.current;
        }

        let deceleration = self.current.scale(amount / length);
        self.current = self.current.sub(deceleration);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_animation_halfway() {
        let mut anim = LinearAnimation::new(0.0f32, 10.0, 4.0);
        assert_eq!(anim.animate(2.0), 5.0);
        assert_eq!(anim.time_left(), 2.0);
    }

    #[test]
    fn test_linear_animation_clamps_step() {
        let mut anim = LinearAnimation::new(Vec2::ZERO, Vec2::new(4.0, 8.0), 1.0);
        assert_eq!(anim.animate(10.0), Vec2::new(4.0, 8.0));
        assert!(anim.is_finished());
        assert_eq!(anim.animate(1.0), Vec2::new(4.0, 8.0));
    }

    #[test]
    fn test_linear_animation_negative_step_is_noop() {
        let mut anim = LinearAnimation::new(1.0f32, 3.0, 1.0);
        assert_eq!(anim.animate(-1.0), 1.0);
        assert_eq!(anim.time_left(), 1.0);
    }

    #[test]
    fn test_linear_animation_zero_duration_snaps() {
        let mut anim = LinearAnimation::new(Vec3::ZERO, Vec3::ONE, 0.0);
        assert_eq!(anim.animate(0.0), Vec3::ONE);
    }

    #[test]
    fn test_deceleration_slows_down() {
        let mut anim = DecelerationAnimation::with_rate(Vec2::new(3.0, 4.0), 1.0).unwrap();
        let v = anim.animate(1.0);
        assert!((v.length() - 4.0).abs() < 1e-5);
        assert!((v.normalize() - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_deceleration_stops_without_overshoot() {
        let mut anim = DecelerationAnimation::with_rate(Vec3::new(0.5, 0.0, 0.0), 2.0).unwrap();
        assert_eq!(anim.animate(1.0), Vec3::ZERO);
        assert!(anim.is_stopped());
        assert_eq!(anim.animate(1.0), Vec3::ZERO);
    }

    #[test]
    fn test_deceleration_rejects_bad_rate() {
        let mut anim = DecelerationAnimation::new(1.0f32);
        assert_eq!(
            anim.set_deceleration_rate(0.0),
            Err(AnimationError::InvalidDecelerationRate(0.0))
        );
        assert!(anim.set_deceleration_rate(f32::NAN).is_err());
        assert_eq!(anim.deceleration_rate(), 1.0);
    }

    #[test]
    fn test_vec4_animatable() {
        let v = Vec4::new(1.0, 2.0, 2.0, 0.0);
        assert_eq!(Animatable::length(v), 3.0);
        assert_eq!(<Vec4 as Animatable>::zero(), Vec4::ZERO);
    }
}
