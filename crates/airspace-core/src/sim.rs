//! Simulation state machine.
//!
//! Owns the world, settings, UAV population and alert log. The caller drives
//! it by invoking [`Simulation::tick`] (or [`Simulation::tick_at`]) once per
//! frame; all commands mutate state between ticks.

use std::collections::VecDeque;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{SimError, SimResult};
use crate::models::{Alert, CreateZoneRequest, RestrictedZone, Uav, World, BATTERY_FULL};
use crate::settings::{Setting, SimulationSettings};
use crate::tick;
use crate::vector::Vector3;

/// Newest-first alert log size.
pub const ALERT_LOG_CAPACITY: usize = 100;

/// Upper bound on a single tick, guards against long frame gaps.
pub const MAX_TICK_SECS: f64 = 0.1;

/// Return-to-base cruise as a fraction of max speed.
pub const RETURN_SPEED_FACTOR: f64 = 0.8;

const DEFAULT_RADIUS_M: f64 = 5.0;
const SPAWN_SPREAD: f64 = 0.8;
const SPAWN_MIN_ALTITUDE_M: f64 = 30.0;
const SPAWN_MAX_ALTITUDE_M: f64 = 120.0;
const SPAWN_HORIZONTAL_SPEED: f64 = 0.7;
const SPAWN_VERTICAL_SPEED: f64 = 0.2;

/// Authoritative simulation state.
pub struct Simulation {
    world: World,
    settings: SimulationSettings,
    uavs: Vec<Uav>,
    alerts: VecDeque<Alert>,
    running: bool,
    last_tick_at: Option<Instant>,
    rng: StdRng,
}

/// Serializable view for renderers and the advisory service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSnapshot {
    pub running: bool,
    pub world: World,
    pub settings: SimulationSettings,
    pub uavs: Vec<Uav>,
    pub alerts: Vec<Alert>,
}

impl SimulationSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationSettings::default(), World::default())
    }
}

impl Simulation {
    /// Create a stopped simulation with an OS-seeded population generator.
    ///
    /// `world` is taken as given; check it with [`World::validate`] first.
    /// A degenerate box never panics, it collapses spawns onto the origin.
    pub fn new(settings: SimulationSettings, world: World) -> Self {
        Self::with_rng(settings, world, StdRng::from_os_rng())
    }

    /// Create a stopped simulation whose generated populations are reproducible.
    pub fn with_seed(settings: SimulationSettings, world: World, seed: u64) -> Self {
        Self::with_rng(settings, world, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: SimulationSettings, world: World, rng: StdRng) -> Self {
        Self {
            world,
            settings,
            uavs: Vec::new(),
            alerts: VecDeque::with_capacity(ALERT_LOG_CAPACITY),
            running: false,
            last_tick_at: None,
            rng,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn uavs(&self) -> &[Uav] {
        &self.uavs
    }

    pub fn uav(&self, uav_id: &str) -> Option<&Uav> {
        self.uavs.iter().find(|u| u.id == uav_id)
    }

    /// Alert log, newest first.
    pub fn alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ========== LIFECYCLE ==========

    /// Start ticking. Generates a population first if there is none.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        if self.uavs.is_empty() {
            self.uavs = self.generate_uavs(self.settings.num_uavs, 0);
        }
        self.running = true;
        self.last_tick_at = Some(Instant::now());
        info!("Simulation started with {} UAV(s)", self.uavs.len());
    }

    /// Stop ticking; UAV state is kept.
    pub fn stop(&mut self) {
        self.running = false;
        info!("Simulation stopped");
    }

    /// Replace the population with a fresh one and clear alerts.
    /// Leaves the running flag as it was.
    pub fn reset(&mut self) {
        self.uavs = self.generate_uavs(self.settings.num_uavs, 0);
        self.alerts.clear();
        self.last_tick_at = None;
        info!("Simulation reset with {} UAV(s)", self.uavs.len());
    }

    /// Replace the population with caller-built UAVs.
    pub fn load_uavs(&mut self, uavs: Vec<Uav>) {
        self.settings.num_uavs = uavs.len();
        self.uavs = uavs;
        debug!("Loaded {} UAV(s)", self.uavs.len());
    }

    // ========== TICKING ==========

    /// Advance by `dt` seconds, clamped to `0..=MAX_TICK_SECS`.
    /// Returns the alerts this tick produced; they are also prepended to the log.
    pub fn tick(&mut self, dt: f64) -> Vec<Alert> {
        if !self.running || self.uavs.is_empty() {
            return Vec::new();
        }
        let dt = dt.max(0.0).min(MAX_TICK_SECS);

        let outcome = tick::step(&self.uavs, dt, &self.settings, &self.world);
        self.uavs = outcome.uavs;
        self.push_alerts(&outcome.alerts);

        debug!(
            dt,
            uavs = self.uavs.len(),
            alerts = outcome.alerts.len(),
            "Tick applied"
        );
        outcome.alerts
    }

    /// Advance by the wall-clock time since the previous anchor.
    ///
    /// Without an anchor the fixed `time_step_ms` is used.
    pub fn tick_at(&mut self, now: Instant) -> Vec<Alert> {
        if !self.running {
            return Vec::new();
        }
        let dt = match self.last_tick_at {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f64(),
            None => self.settings.tick_duration(),
        };
        self.last_tick_at = Some(now);
        self.tick(dt)
    }

    fn push_alerts(&mut self, alerts: &[Alert]) {
        for alert in alerts.iter().rev() {
            self.alerts.push_front(alert.clone());
        }
        self.alerts.truncate(ALERT_LOG_CAPACITY);
    }

    // ========== SETTINGS ==========

    /// Change one setting. `NumUavs` resizes the population in place and
    /// `MaxUavSpeed` clamps every velocity; the rest are plain swaps.
    pub fn set_setting(&mut self, setting: Setting) {
        match setting {
            Setting::NumUavs(desired) => self.resize_population(desired),
            Setting::MaxUavSpeed(max) => {
                for uav in &mut self.uavs {
                    uav.max_speed = max;
                    uav.velocity = Vector3::new(
                        clamp_component(uav.velocity.x, max),
                        clamp_component(uav.velocity.y, max),
                        clamp_component(uav.velocity.z, max),
                    );
                }
            }
            _ => {}
        }
        self.settings.apply(&setting);
        debug!(?setting, "Setting applied");
    }

    fn resize_population(&mut self, desired: usize) {
        let current = self.uavs.len();
        if desired > current {
            let extra = self.generate_uavs(desired - current, current);
            self.uavs.extend(extra);
        } else {
            self.uavs.truncate(desired);
        }
    }

    // ========== WORLD EDITS ==========

    /// Add a restricted zone and return its generated id.
    pub fn add_zone(&mut self, request: CreateZoneRequest) -> SimResult<String> {
        let id = format!(
            "Z-{}",
            Uuid::new_v4().simple().to_string()[..8].to_uppercase()
        );
        let zone = RestrictedZone::new(id.clone(), request.name, request.polygon);
        let errors = zone.validate();
        if !errors.is_empty() {
            return Err(SimError::InvalidZone(errors));
        }
        info!("Added restricted zone {} ({})", zone.id, zone.name);
        self.world.restricted_zones.push(zone);
        Ok(id)
    }

    pub fn remove_zone(&mut self, zone_id: &str) -> SimResult<RestrictedZone> {
        let idx = self
            .world
            .restricted_zones
            .iter()
            .position(|z| z.id == zone_id)
            .ok_or_else(|| SimError::UnknownZone(zone_id.to_string()))?;
        let zone = self.world.restricted_zones.remove(idx);
        info!("Removed restricted zone {}", zone.id);
        Ok(zone)
    }

    /// Swap in a whole world layout. UAVs are kept and reflect back into
    /// the new bounds on the next tick.
    pub fn apply_world(&mut self, world: World) -> SimResult<()> {
        let errors = world.validate();
        if !errors.is_empty() {
            return Err(SimError::InvalidWorld(errors));
        }
        info!(
            "Applied world {}m x {}m with {} zone(s)",
            world.size_meters,
            world.height_meters,
            world.restricted_zones.len()
        );
        self.world = world;
        Ok(())
    }

    pub fn set_grid_step(&mut self, step_meters: Option<f64>) {
        self.world.grid_step_meters = step_meters;
    }

    // ========== OPERATOR COMMANDS ==========

    /// Zero a UAV's velocity.
    pub fn hold_uav(&mut self, uav_id: &str) -> SimResult<()> {
        let uav = self.uav_mut(uav_id)?;
        uav.velocity = Vector3::ZERO;
        debug!("HOLD issued to {}", uav_id);
        Ok(())
    }

    /// Point a UAV at `target` (default: origin at its current altitude)
    /// and cruise there at a fraction of max speed.
    pub fn return_uav(&mut self, uav_id: &str, target: Option<Vector3>) -> SimResult<()> {
        let uav = self.uav_mut(uav_id)?;
        let target = target.unwrap_or(Vector3::new(0.0, 0.0, uav.position.z));
        let heading = (target - uav.position).normalize();
        uav.velocity = heading * (uav.max_speed * RETURN_SPEED_FACTOR);
        if heading != Vector3::ZERO {
            uav.direction = heading;
        }
        debug!("Return-to-base issued to {}", uav_id);
        Ok(())
    }

    /// Override battery level, clamped to 0..=100.
    pub fn set_uav_battery(&mut self, uav_id: &str, battery: f64) -> SimResult<()> {
        let uav = self.uav_mut(uav_id)?;
        uav.battery = battery.max(0.0).min(BATTERY_FULL);
        Ok(())
    }

    /// Re-point a UAV, keeping its speed. A zero vector is ignored.
    pub fn set_uav_direction(&mut self, uav_id: &str, direction: Vector3) -> SimResult<()> {
        let uav = self.uav_mut(uav_id)?;
        let heading = direction.normalize();
        if heading == Vector3::ZERO {
            return Ok(());
        }
        let speed = uav.speed();
        uav.direction = heading;
        uav.velocity = heading * speed;
        Ok(())
    }

    fn uav_mut(&mut self, uav_id: &str) -> SimResult<&mut Uav> {
        self.uavs
            .iter_mut()
            .find(|u| u.id == uav_id)
            .ok_or_else(|| SimError::UnknownUav(uav_id.to_string()))
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            running: self.running,
            world: self.world.clone(),
            settings: self.settings.clone(),
            uavs: self.uavs.clone(),
            alerts: self.alerts.iter().cloned().collect(),
        }
    }

    // ========== POPULATION ==========

    /// Generate `count` UAVs numbered from `start_index + 1`.
    fn generate_uavs(&mut self, count: usize, start_index: usize) -> Vec<Uav> {
        // Non-positive or NaN extents spawn at the origin instead of an empty range.
        let spread = (self.world.half_extent() * SPAWN_SPREAD).max(0.0);
        let z_min = SPAWN_MIN_ALTITUDE_M.min(self.world.height_meters);
        let z_max = SPAWN_MAX_ALTITUDE_M.min(self.world.height_meters);
        let max_speed = self.settings.max_uav_speed;
        let total = start_index + count;

        (start_index..total)
            .map(|i| {
                let position = Vector3::new(
                    self.rng.random_range(-spread..=spread),
                    self.rng.random_range(-spread..=spread),
                    self.rng.random_range(z_min..=z_max),
                );
                let heading = Vector3::new(
                    self.rng.random_range(-1.0..=1.0),
                    self.rng.random_range(-1.0..=1.0),
                    self.rng.random_range(-0.1..=0.1),
                );
                let velocity = Vector3::new(
                    heading.x * max_speed * SPAWN_HORIZONTAL_SPEED,
                    heading.y * max_speed * SPAWN_HORIZONTAL_SPEED,
                    heading.z * max_speed * SPAWN_VERTICAL_SPEED,
                );
                let hue = (i * 360) / total;

                let mut uav = Uav::new(format!("UAV-{}", i + 1), position, max_speed, DEFAULT_RADIUS_M)
                    .with_velocity(velocity);
                uav.color = format!("hsl({}, 70%, 55%)", hue);
                uav
            })
            .collect()
    }
}

fn clamp_component(value: f64, max: f64) -> f64 {
    value.min(max).max(-max)
}
