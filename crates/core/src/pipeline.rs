//! Impact-effects pipeline
//!
//! Runs the energy calculation, every effect model and the ratio checks for
//! one set of parameters and assembles an `ImpactReport`. The pipeline holds
//! no mutable state; a single instance can be shared across threads and
//! invoked concurrently.

use crate::catalog::{DateWindow, NeoCatalog};
use crate::config::{PipelineConfig, ScalingFactors};
use crate::core_types::{ImpactorParameters, Megatons, Meters};
use crate::error::Result;
use crate::physics::{
    BlastEffects, BlastModel, CraterModel, CraterResult, EffectModel, EnergyCalculator,
    EnergyResult, FireballModel, ImpactContext, RelationshipVerifier, SeismicEffects,
    SeismicModel, ThermalEffects, ThermalModel, TsunamiEffects, TsunamiModel, VerificationReport,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Object name used for parameters that did not come from a catalog
pub const CUSTOM_INPUT_NAME: &str = "Custom input";

/// Everything the pipeline computed for one impact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactReport {
    /// Object name, or "Custom input"
    pub name: String,
    /// Input parameters as supplied
    pub parameters: ImpactorParameters,
    /// Mass, energy and normalized velocity
    pub energy: EnergyResult,
    /// Crater geometry
    pub crater: CraterResult,
    /// Fireball radius
    pub fireball_radius: Meters,
    /// Thermal radii per injury category
    pub thermal: ThermalEffects,
    /// Overpressure radii and winds
    pub blast: BlastEffects,
    /// Magnitude and regional intensity
    pub seismic: SeismicEffects,
    /// Tsunami estimate, present for water targets only
    pub tsunami: Option<TsunamiEffects>,
    /// Effect/crater ratio checks
    pub verification: VerificationReport,
    /// Scaling factors that were applied to the radii
    pub scaling: ScalingFactors,
}

impl ImpactReport {
    /// Impact energy in megatons of TNT
    pub fn energy_megatons(&self) -> Megatons {
        self.energy.megatons()
    }

    /// Whether a tsunami is expected (always false on land)
    pub fn tsunami_likely(&self) -> bool {
        self.tsunami.is_some_and(|t| t.likely)
    }
}

/// Orchestrates the energy calculator and the effect models
pub struct ImpactEffectsPipeline {
    config: PipelineConfig,
    energy: EnergyCalculator,
    crater: Box<dyn EffectModel<Output = CraterResult>>,
    fireball: Box<dyn EffectModel<Output = Meters>>,
    thermal: Box<dyn EffectModel<Output = ThermalEffects>>,
    blast: Box<dyn EffectModel<Output = BlastEffects>>,
    seismic: Box<dyn EffectModel<Output = SeismicEffects>>,
    tsunami: Box<dyn EffectModel<Output = Option<TsunamiEffects>>>,
    verifier: RelationshipVerifier,
}

impl Default for ImpactEffectsPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl ImpactEffectsPipeline {
    /// Build a pipeline with the standard models configured by `config`.
    ///
    /// Constants are used as given; `try_new` checks them first.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            energy: EnergyCalculator,
            crater: Box::new(CraterModel::new(config.crater)),
            fireball: Box::new(FireballModel::new(config.fireball)),
            thermal: Box::new(ThermalModel::new(config.thermal)),
            blast: Box::new(BlastModel::new(config.blast)),
            seismic: Box::new(SeismicModel::new(config.seismic)),
            tsunami: Box::new(TsunamiModel::new(config.tsunami)),
            verifier: RelationshipVerifier,
        }
    }

    /// Build a pipeline after checking every constant in `config`.
    ///
    /// # Errors
    /// Returns `ImpactError::InvalidParameter` naming the first constant
    /// that would make a result negative, NaN or infinite.
    pub fn try_new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Configuration the standard models were built from
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Replace the crater model
    pub fn with_crater_model(
        mut self,
        model: impl EffectModel<Output = CraterResult> + 'static,
    ) -> Self {
        self.crater = Box::new(model);
        self
    }

    /// Replace the fireball model
    pub fn with_fireball_model(mut self, model: impl EffectModel<Output = Meters> + 'static) -> Self {
        self.fireball = Box::new(model);
        self
    }

    /// Replace the thermal model
    pub fn with_thermal_model(
        mut self,
        model: impl EffectModel<Output = ThermalEffects> + 'static,
    ) -> Self {
        self.thermal = Box::new(model);
        self
    }

    /// Replace the blast model
    pub fn with_blast_model(
        mut self,
        model: impl EffectModel<Output = BlastEffects> + 'static,
    ) -> Self {
        self.blast = Box::new(model);
        self
    }

    /// Replace the seismic model
    pub fn with_seismic_model(
        mut self,
        model: impl EffectModel<Output = SeismicEffects> + 'static,
    ) -> Self {
        self.seismic = Box::new(model);
        self
    }

    /// Replace the tsunami model
    pub fn with_tsunami_model(
        mut self,
        model: impl EffectModel<Output = Option<TsunamiEffects>> + 'static,
    ) -> Self {
        self.tsunami = Box::new(model);
        self
    }

    /// Validate the parameters, then evaluate them.
    ///
    /// # Errors
    /// Returns `ImpactError::InvalidParameter` when validation fails; no
    /// model runs in that case.
    pub fn run(&self, name: &str, params: &ImpactorParameters) -> Result<ImpactReport> {
        if let Err(err) = params.validate() {
            warn!("Rejected parameters for '{}': {}", name, err);
            return Err(err);
        }
        Ok(self.evaluate(name, params))
    }

    /// Evaluate every model for already-validated parameters.
    ///
    /// Never fails: degenerate inputs (e.g. zero diameter) give a
    /// well-formed report with zero effects.
    pub fn evaluate(&self, name: &str, params: &ImpactorParameters) -> ImpactReport {
        let energy = self
            .energy
            .calculate(params.diameter_m, params.density_kg_m3, params.velocity_m_s);
        let megatons = energy.megatons();
        let ctx = ImpactContext::new(params, &energy);

        info!(
            "Evaluating impact '{}': {:.3e} kg at {:.0} m/s, {:.2} MT",
            name, energy.mass_kg, energy.velocity_ms, *megatons
        );

        let crater = self.crater.evaluate(megatons, &ctx);
        debug!("Crater: {} wide, {} deep", crater.diameter, crater.depth);

        let fireball_radius = self.fireball.evaluate(megatons, &ctx);
        debug!("Fireball radius: {}", fireball_radius);

        let thermal = self.thermal.evaluate(megatons, &ctx);
        let blast = self.blast.evaluate(megatons, &ctx);
        debug!(
            "Thermal/blast computed ({} thermal categories, {} overpressure levels)",
            thermal.radii.len(),
            blast.levels.len()
        );

        let seismic = self.seismic.evaluate(megatons, &ctx);
        debug!("Seismic Mw {:.2}", seismic.moment_magnitude);

        let tsunami = self.tsunami.evaluate(megatons, &ctx);
        if let Some(t) = &tsunami {
            debug!("Tsunami likely: {} ({})", t.likely, t.classification);
        }

        let verification = self
            .verifier
            .verify(&crater, fireball_radius, &thermal, &blast);

        ImpactReport {
            name: name.to_string(),
            parameters: params.clone(),
            energy,
            crater,
            fireball_radius,
            thermal,
            blast,
            seismic,
            tsunami,
            verification,
            scaling: self.config.scaling_factors(),
        }
    }

    /// Run many scenarios in parallel, preserving input order.
    ///
    /// Each entry is validated independently; one bad entry does not stop
    /// the others.
    pub fn evaluate_batch(&self, scenarios: &[(String, ImpactorParameters)]) -> Vec<Result<ImpactReport>> {
        scenarios
            .par_iter()
            .map(|(name, params)| self.run(name, params))
            .collect()
    }

    /// Look an object up in a catalog and evaluate it.
    ///
    /// `template` supplies everything a catalog record does not carry:
    /// target, burst altitude, soil and site.
    ///
    /// # Errors
    /// Propagates `NotFound`/`UpstreamUnavailable` from the catalog and
    /// `InvalidParameter` when the record lacks usable size or velocity.
    pub fn run_from_catalog<C: NeoCatalog + ?Sized>(
        &self,
        catalog: &C,
        name: &str,
        window: &DateWindow,
        template: ImpactorParameters,
    ) -> Result<ImpactReport> {
        let record = catalog.lookup(name, window).inspect_err(|err| {
            warn!("Catalog lookup for '{}' failed: {}", name, err);
        })?;
        let params = record.apply_to(template)?;
        self.run(&record.name, &params)
    }
}
