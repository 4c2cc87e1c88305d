//! Lumped thermal mass with power input and ambient cooling.

use fg_core::{CoreResult, SignalId, SignalNamespace, SignalStore};

use crate::traits::Model;

/// Simple heat capacity model: `dT/dt = (P_in - h*(T - T_amb)) / C`.
///
/// - `T`: temperature (degC), the owned output
/// - `P_in`: net heating power (W), read each tick
/// - `T_amb`: ambient temperature (degC), read each tick
/// - `C`: thermal mass (J/K)
/// - `h`: heat transfer coefficient (W/K)
///
/// Integration is forward Euler, so the stable step is `dt < 2*C/h`; with
/// `h <= 0` there is no cooling term and the scheme is unconditionally
/// stable.
#[derive(Debug, Clone)]
pub struct ThermalMass {
    id: String,
    thermal_mass: f64,
    heat_transfer_coeff: f64,
    initial_temp: f64,
    temperature: f64,
    temp_signal: SignalId,
    power_signal: SignalId,
    ambient_signal: SignalId,
}

impl ThermalMass {
    /// Build the model, interning its three signal paths in `ns`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        thermal_mass: f64,
        heat_transfer_coeff: f64,
        initial_temp: f64,
        temp_signal_path: &str,
        power_signal_path: &str,
        ambient_signal_path: &str,
        ns: &mut SignalNamespace,
    ) -> Self {
        Self {
            id: id.into(),
            thermal_mass,
            heat_transfer_coeff,
            initial_temp,
            temperature: initial_temp,
            temp_signal: ns.intern(temp_signal_path),
            power_signal: ns.intern(power_signal_path),
            ambient_signal: ns.intern(ambient_signal_path),
        }
    }

    /// Current model temperature in degC.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl Model for ThermalMass {
    fn tick(&mut self, dt: f64, store: &mut SignalStore) -> CoreResult<()> {
        let net_power = store.read_value(self.power_signal);
        let ambient = store.read_value(self.ambient_signal);

        let heat_loss = self.heat_transfer_coeff * (self.temperature - ambient);

        // Forward Euler: T += dT/dt * dt
        let delta = (net_power - heat_loss) / self.thermal_mass * dt;
        self.temperature += delta;

        store.write(self.temp_signal, self.temperature, "degC")?;
        store.mark_physics_driven(self.temp_signal, true);
        Ok(())
    }

    fn reset(&mut self) {
        self.temperature = self.initial_temp;
    }

    fn stability_limit(&self) -> f64 {
        // Forward Euler stability for dT/dt = -(h/C)*T: dt < 2*C/h.
        if self.heat_transfer_coeff <= 0.0 {
            return f64::INFINITY; // no cooling, unconditionally stable
        }
        2.0 * self.thermal_mass / self.heat_transfer_coeff
    }

    fn describe(&self) -> String {
        format!(
            "ThermalMass(id={}, C={} J/K, h={} W/K, T0={} degC)",
            self.id, self.thermal_mass, self.heat_transfer_coeff, self.initial_temp
        )
    }

    fn output_signals(&self) -> Vec<SignalId> {
        vec![self.temp_signal]
    }
}
