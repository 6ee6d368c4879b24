// Reservoir, fluid and well descriptions

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::SuperpositionError;

/// Rock and fluid properties in oilfield units.
///
/// Defaults are the fixed values used by the two-well demonstration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservoirProperties {
    /// formation volume factor, RB/STB
    pub formation_volume_factor: f64,
    /// oil viscosity, cp
    pub viscosity: f64,
    /// total compressibility, 1/psi
    pub total_compressibility: f64,
    /// porosity, fraction
    pub porosity: f64,
    /// permeability, md
    pub permeability: f64,
    /// net thickness, ft
    pub thickness: f64,
}

impl Default for ReservoirProperties {
    fn default() -> Self {
        Self {
            formation_volume_factor: 1.205,
            viscosity: 2.50,
            total_compressibility: 5.79e-6,
            porosity: 0.22,
            permeability: 51.6,
            thickness: 55.8,
        }
    }
}

impl ReservoirProperties {
    /// Reject properties that make the line-source solution singular or meaningless.
    ///
    /// All six properties must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), SuperpositionError> {
        let checks = [
            ("formation volume factor", self.formation_volume_factor),
            ("viscosity", self.viscosity),
            ("total compressibility", self.total_compressibility),
            ("porosity", self.porosity),
            ("permeability", self.permeability),
            ("thickness", self.thickness),
        ];
        for (parameter, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(SuperpositionError::domain(parameter, value));
            }
        }
        Ok(())
    }
}

/// A producing (or injecting, for negative rate) well seen from the observation point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Well {
    /// distance from the well to the observation point, ft
    pub distance: f64,
    /// surface rate, STB/day; negative for injection
    pub rate: f64,
}

impl Well {
    pub fn new(distance: f64, rate: f64) -> Self {
        Self { distance, rate }
    }
}

/// Ordered set of wells. Index order is the summation order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WellSet(pub Vec<Well>);

impl Default for WellSet {
    fn default() -> Self {
        Self(vec![Well::new(500.0, 500.0), Well::new(500.0, 500.0)])
    }
}

impl WellSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn distances(&self) -> Array1<f64> {
        self.0.iter().map(|well| well.distance).collect()
    }

    pub fn rates(&self) -> Array1<f64> {
        self.0.iter().map(|well| well.rate).collect()
    }

    /// Every distance must be finite and strictly positive. Rates are unconstrained.
    pub fn validate(&self) -> Result<(), SuperpositionError> {
        if self.is_empty() {
            return Err(SuperpositionError::domain("well count", 0.0));
        }
        for (j, well) in self.0.iter().enumerate() {
            if !(well.distance.is_finite() && well.distance > 0.0) {
                return Err(SuperpositionError::domain(
                    format!("distance of well {}", j),
                    well.distance,
                ));
            }
            if !well.rate.is_finite() {
                return Err(SuperpositionError::domain(format!("rate of well {}", j), well.rate));
            }
        }
        Ok(())
    }
}

impl From<Vec<Well>> for WellSet {
    fn from(wells: Vec<Well>) -> Self {
        Self(wells)
    }
}

/// Every time sample must be finite and strictly positive.
pub fn validate_time(time: ArrayView1<'_, f64>) -> Result<(), SuperpositionError> {
    match time.iter().find(|t| !(t.is_finite() && **t > 0.0)) {
        Some(&t) => Err(SuperpositionError::domain("time", t)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn default_properties_are_valid() {
        assert!(ReservoirProperties::default().validate().is_ok());
        assert!(WellSet::default().validate().is_ok());
    }

    #[test]
    fn zero_permeability_is_rejected() {
        let props = ReservoirProperties {
            permeability: 0.0,
            ..Default::default()
        };
        assert_eq!(
            props.validate(),
            Err(SuperpositionError::domain("permeability", 0.0))
        );
    }

    #[test]
    fn zero_distance_is_rejected_but_negative_rate_is_not() {
        let wells = WellSet::from(vec![Well::new(500.0, -250.0), Well::new(0.0, 100.0)]);
        match wells.validate() {
            Err(SuperpositionError::Domain { parameter, value }) => {
                assert_eq!(parameter, "distance of well 1");
                assert_eq!(value, 0.0);
            }
            other => panic!("expected domain error, got {:?}", other),
        }
        let injector = WellSet::from(vec![Well::new(500.0, -250.0)]);
        assert!(injector.validate().is_ok());
    }

    #[test]
    fn zero_time_is_rejected() {
        assert!(validate_time(array![0.1, 1.0].view()).is_ok());
        assert!(validate_time(array![0.1, 0.0, 1.0].view()).is_err());
    }

    #[test]
    fn well_set_arrays_follow_index_order() {
        let wells = WellSet::from(vec![Well::new(100.0, 1.0), Well::new(200.0, 2.0)]);
        assert_eq!(wells.distances(), array![100.0, 200.0]);
        assert_eq!(wells.rates(), array![1.0, 2.0]);
    }
}
