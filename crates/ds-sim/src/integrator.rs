//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::model::TransientModel;

/// One explicit step of length `dt` from `(t, x)`.
pub trait Integrator {
    fn step<M: TransientModel>(
        &self,
        model: &M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State>;
}

/// Classical fourth-order Runge-Kutta; four rhs evaluations per step.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn step<M: TransientModel>(
        &self,
        model: &M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let half = 0.5 * dt;
        let k1 = model.rhs(t, x)?;
        let k2 = model.rhs(t + half, &model.add(x, &model.scale(&k1, half)))?;
        let k3 = model.rhs(t + half, &model.add(x, &model.scale(&k2, half)))?;
        let k4 = model.rhs(t + dt, &model.add(x, &model.scale(&k3, dt)))?;

        // x + dt/6 (k1 + k4) + dt/3 (k2 + k3)
        let ends = model.scale(&model.add(&k1, &k4), dt / 6.0);
        let middle = model.scale(&model.add(&k2, &k3), dt / 3.0);
        Ok(model.add(x, &model.add(&ends, &middle)))
    }
}

/// Explicit Euler, x + dt f(t, x). With `dt = 1` this is the classic
/// day-step difference scheme.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &M,
        t: f64,
        x: &M::State,
        dt: f64,
    ) -> SimResult<M::State> {
        let slope = model.rhs(t, x)?;
        Ok(model.add(x, &model.scale(&slope, dt)))
    }
}
