// library

pub mod config;
pub mod error;
pub mod expint;
pub mod reservoir;
pub mod superposition;

pub use config::{ConfigError, ScenarioConfig, TimeGridConfig};
pub use error::SuperpositionError;
pub use expint::{exp1, expi};
pub use reservoir::{validate_time, ReservoirProperties, Well, WellSet};
pub use superposition::{
    default_time_grid, evaluate_strict, first_non_finite, single_well_drawdown,
    sp_space_inf_acting, time_grid, DIFFUSIVITY_COEFFICIENT, MAX_TIME_SAMPLES, RATE_COEFFICIENT,
};

#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
    use pyo3::{exceptions::PyValueError, prelude::*};

    use crate::{ReservoirProperties, SuperpositionError};

    impl From<SuperpositionError> for PyErr {
        fn from(err: SuperpositionError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    //wrapper
    #[pyfunction]
    #[pyo3(name = "sp_space_inf_acting")]
    #[allow(clippy::too_many_arguments)]
    fn sp_space_inf_acting_py<'py>(
        py: Python<'py>,
        nwells: usize,
        r: PyReadonlyArray1<'py, f64>,
        time: PyReadonlyArray1<'py, f64>,
        p_i: f64,
        q: PyReadonlyArray1<'py, f64>,
        formation_volume_factor: f64,
        viscosity: f64,
        total_compressibility: f64,
        porosity: f64,
        permeability: f64,
        thickness: f64,
    ) -> PyResult<Bound<'py, PyArray1<f64>>> {
        let props = ReservoirProperties {
            formation_volume_factor,
            viscosity,
            total_compressibility,
            porosity,
            permeability,
            thickness,
        };
        let pressure = crate::sp_space_inf_acting(
            nwells,
            r.as_array(),
            time.as_array(),
            p_i,
            q.as_array(),
            &props,
        )?;
        Ok(pressure.into_pyarray_bound(py))
    }

    #[pyfunction]
    fn expi(x: f64) -> f64 {
        crate::expi(x)
    }

    #[pymodule]
    fn superposition(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(sp_space_inf_acting_py, m)?)?;
        m.add_function(wrap_pyfunction!(expi, m)?)?;
        Ok(())
    }
}
