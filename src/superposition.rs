// Superposition in space for infinite-acting radial flow

use ndarray::{Array1, ArrayView1};
use tracing::debug;

use crate::error::SuperpositionError;
use crate::expint::expi;
use crate::reservoir::{validate_time, ReservoirProperties, WellSet};

/// Rate coefficient of the line-source solution in oilfield units.
pub const RATE_COEFFICIENT: f64 = 70.6;
/// Diffusivity coefficient of the exponential-integral argument in oilfield units.
pub const DIFFUSIVITY_COEFFICIENT: f64 = 948.0;

/// Pressure contribution of one well at one time.
///
/// $$\begin{equation}
/// \Delta p = \frac{70.6\, q B \mu}{k h}\,
/// \mathrm{Ei}\left(-\frac{948\, \phi \mu c_t r^2}{k t}\right)
/// \end{equation}$$
#[inline]
fn well_term(distance: f64, rate: f64, time: f64, props: &ReservoirProperties) -> f64 {
    let ReservoirProperties {
        formation_volume_factor,
        viscosity,
        total_compressibility,
        porosity,
        permeability,
        thickness,
    } = *props;
    RATE_COEFFICIENT * rate * formation_volume_factor * viscosity / (permeability * thickness)
        * expi(
            -DIFFUSIVITY_COEFFICIENT * porosity * viscosity * total_compressibility
                * (distance * distance)
                / (permeability * time),
        )
}

/// Pressure change caused by a single well, one value per time sample
///
/// Negative for a producer, positive for an injector.
///
/// # Arguments
/// * distance: distance from the well to the observation point in ft
/// * rate: well rate in STB/day
/// * time: time samples in hr
/// * props: rock and fluid properties
pub fn single_well_drawdown(
    distance: f64,
    rate: f64,
    time: ArrayView1<'_, f64>,
    props: &ReservoirProperties,
) -> Array1<f64> {
    time.mapv(|t| well_term(distance, rate, t, props))
}

/// Pressure at a point in an infinite-acting reservoir produced by `n_wells` wells
///
/// $$\begin{equation}
/// p(t) = p_i + \sum_{j=0}^{n-1} \frac{70.6\, q_j B \mu}{k h}\,
/// \mathrm{Ei}\left(-\frac{948\, \phi \mu c_t r_j^2}{k t}\right)
/// \end{equation}$$
///
/// Contributions are accumulated in well index order. Only the first
/// `n_wells` entries of `distances` and `rates` are used.
///
/// Inputs are not range checked. A zero distance gives `-inf` for a producer,
/// a zero time gives the `t -> 0` limit (no contribution) unless the distance
/// is also zero, and non-positive permeability or thickness gives `inf` or
/// `nan`. Use [`evaluate_strict`] to reject those inputs up front.
///
/// # Arguments
/// * n_wells: number of wells
/// * distances: distance from each well to the observation point in ft
/// * time: time samples in hr
/// * p_i: initial reservoir pressure in psia
/// * rates: rate of each well in STB/day, negative for injection
/// * props: rock and fluid properties
///
/// # Returns
/// pressure in psia at each time sample
pub fn sp_space_inf_acting(
    n_wells: usize,
    distances: ArrayView1<'_, f64>,
    time: ArrayView1<'_, f64>,
    p_i: f64,
    rates: ArrayView1<'_, f64>,
    props: &ReservoirProperties,
) -> Result<Array1<f64>, SuperpositionError> {
    check_len("distances", distances.len(), n_wells)?;
    check_len("rates", rates.len(), n_wells)?;
    debug!(n_wells, samples = time.len(), "evaluating superposed pressure");

    let mut pressure = Array1::from_elem(time.len(), p_i);
    for j in 0..n_wells {
        let (distance, rate) = (distances[j], rates[j]);
        pressure.zip_mut_with(&time, |p, &t| *p += well_term(distance, rate, t, props));
    }
    Ok(pressure)
}

/// Evaluate after rejecting inputs that would make the result non-finite.
pub fn evaluate_strict(
    wells: &WellSet,
    time: ArrayView1<'_, f64>,
    p_i: f64,
    props: &ReservoirProperties,
) -> Result<Array1<f64>, SuperpositionError> {
    if !p_i.is_finite() {
        return Err(SuperpositionError::domain("initial pressure", p_i));
    }
    props.validate()?;
    wells.validate()?;
    validate_time(time)?;
    sp_space_inf_acting(
        wells.len(),
        wells.distances().view(),
        time,
        p_i,
        wells.rates().view(),
        props,
    )
}

fn check_len(what: &'static str, actual: usize, expected: usize) -> Result<(), SuperpositionError> {
    if actual < expected {
        return Err(SuperpositionError::Shape {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Index of the first sample that is `inf` or `nan`, if any.
pub fn first_non_finite(pressure: ArrayView1<'_, f64>) -> Option<usize> {
    pressure.iter().position(|p| !p.is_finite())
}

/// Largest grid [`time_grid`] will build.
pub const MAX_TIME_SAMPLES: usize = 100_000_000;
const DEFAULT_TIME_SAMPLES: usize = 99_999;

/// Half-open arithmetic time grid `[start, stop)`
///
/// Uses the `numpy.arange` length rule, `ceil((stop - start) / step)`, and
/// fills sample `i` with `start + i * delta` where `delta = (start + step) - start`.
/// An empty grid is returned when `step` is not positive or `stop <= start`.
/// A step so small that the grid would exceed [`MAX_TIME_SAMPLES`] is an error.
pub fn time_grid(start: f64, stop: f64, step: f64) -> Result<Array1<f64>, SuperpositionError> {
    if !(step > 0.0 && stop > start && start.is_finite() && stop.is_finite()) {
        return Ok(Array1::zeros(0));
    }
    let count = ((stop - start) / step).ceil();
    if !(count.is_finite() && count <= MAX_TIME_SAMPLES as f64) {
        return Err(SuperpositionError::domain("time step", step));
    }
    Ok(arange(start, step, count as usize))
}

fn arange(start: f64, step: f64, n: usize) -> Array1<f64> {
    let delta = (start + step) - start;
    Array1::from_shape_fn(n, |i| start + i as f64 * delta)
}

/// The 0.1 hr to 10000 hr grid at 0.1 hr spacing.
pub fn default_time_grid() -> Array1<f64> {
    arange(0.1, 0.1, DEFAULT_TIME_SAMPLES)
}
