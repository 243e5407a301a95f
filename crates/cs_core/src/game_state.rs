//! Turn scheduler: the game clock, housekeeping passes and the unit update
//! quota.
//!
//! A [`GameState`] runs on the simulation thread. Each call to
//! [`GameState::update`] performs a bounded number of unit updates, advances
//! the clock by one tick and runs the hourly, half-daily and daily passes
//! that fall on the new time. Every event goes through the world's message
//! channel; a `false` return means the consumer stopped the game.

use std::ops::ControlFlow;

use tracing::{debug, info};

use crate::ai::{resupply_unit, Ai};
use crate::data::scenario::{Game, ScenarioStart};
use crate::data::variants::Variant;
use crate::flashback::FlashbackHistory;
use crate::math::abs;
use crate::messages::Message;
use crate::options::Options;
use crate::units::Unit;
use crate::world::World;

/// Hour at which the game-over check runs.
const GAME_OVER_CHECK_HOUR: i32 = 18;

/// Days per month; the calendar ignores real month lengths.
const DAYS_PER_MONTH: i32 = 30;

/// The whole mutable state of a game in progress.
pub struct GameState {
    pub(crate) world: World,
    pub(crate) ai: Ai,
    pub(crate) minute: i32,
    pub(crate) hour: i32,
    pub(crate) day: i32,
    pub(crate) month: i32,
    pub(crate) year: i32,
    pub(crate) days_elapsed: i32,
    pub(crate) weather: i32,
    pub(crate) is_night: bool,
    pub(crate) supply_levels: [i32; 2],
    pub(crate) units_updated: i32,
    pub(crate) update_quota: i32,
    pub(crate) flashback: FlashbackHistory,
    pub(crate) variants: Vec<Variant>,
    pub(crate) selected_variant: usize,
    options: Options,
    all_units_hidden: bool,
}

/// Whether it is night at `hour` in `month`. Days are longer around
/// midsummer.
const fn is_night_at(hour: i32, month: i32) -> bool {
    let sunrise_offset = abs(6 - month) / 2;
    hour < 5 + sunrise_offset || hour > 20 - sunrise_offset
}

impl GameState {
    /// Start a game of `variants[selected_variant]` in `world`.
    ///
    /// Units and cities absent from the variant are removed, fatigue is
    /// reset and the game balance is applied to morale.
    ///
    /// # Panics
    ///
    /// Panics if `selected_variant` is out of range.
    #[must_use]
    pub fn new(
        mut world: World,
        start: &ScenarioStart,
        variants: Vec<Variant>,
        selected_variant: usize,
        options: Options,
    ) -> Self {
        assert!(
            selected_variant < variants.len(),
            "invalid variant {selected_variant} of {}",
            variants.len()
        );
        let variant_bit = 1u8 << selected_variant.min(7);
        let balance = options.game_balance;
        for unit in world.units.iter_mut() {
            if unit.variant_bitmap & variant_bit != 0 {
                unit.clear_state();
                unit.half_days_until_appear = 0;
            }
            // Fatigue shares its record byte with the variant bitmap.
            unit.fatigue = 0;
            if unit.side == 0 && balance > 2 {
                unit.morale = (3 + balance) * unit.morale / 5;
            } else if unit.side == 1 && balance < 2 {
                unit.morale = (7 - balance) * unit.morale / 5;
            }
        }
        for city in &mut world.terrain.cities {
            if city.variant_bitmap & variant_bit != 0 {
                city.victory_points = 0;
            }
        }
        let update_quota = world.data.unit_updates_per_time_increment / 2;
        let mut state = Self {
            world,
            ai: Ai::new(),
            minute: start.start_minute,
            hour: start.start_hour,
            day: start.start_day,
            month: start.start_month,
            year: start.start_year,
            days_elapsed: 0,
            weather: start.start_weather,
            is_night: is_night_at(start.start_hour, start.start_month),
            supply_levels: start.start_supply_levels,
            units_updated: 0,
            update_quota,
            flashback: FlashbackHistory::default(),
            variants,
            selected_variant,
            options,
            all_units_hidden: false,
        };
        state.show_all_visible_units();
        state
    }

    /// Run the first hourly pass and announce the start of the game.
    pub fn init(&mut self) -> bool {
        if !self.every_hour() {
            return false;
        }
        self.world.send(Message::Initialized)
    }

    /// Wait for the consumer, then play until the game ends or the consumer
    /// stops it.
    pub fn play(&mut self) {
        if !self.world.wait() || !self.init() {
            return;
        }
        while self.update() {}
    }

    /// Advance the game by one tick. Returns false once the game is over or
    /// the consumer stopped it.
    pub fn update(&mut self) -> bool {
        self.units_updated += 1;
        while self.units_updated <= self.update_quota {
            let ControlFlow::Continue(message) = self.ai.update_unit(&mut self.world, self.weather, self.is_night)
            else {
                return false;
            };
            if !self.world.send(message) {
                return false;
            }
            self.units_updated += 1;
        }
        self.units_updated = 0;

        self.minute += self.world.data.minutes_per_tick;
        if self.minute >= 60 {
            self.minute = 0;
            self.hour += 1;
        }
        if self.hour >= 24 {
            self.hour = 0;
            self.day += 1;
        }
        if self.day >= DAYS_PER_MONTH {
            self.day = 0;
            self.month += 1;
        }
        if self.month >= 12 {
            self.month = 0;
            self.year += 1;
        }
        let _ = self.world.send(Message::TimeChanged);
        if self.minute == 0 {
            if !self.every_hour() {
                return false;
            }
            if self.hour == 0 && !self.every_day() {
                return false;
            }
            if self.hour == GAME_OVER_CHECK_HOUR && self.world.score.is_game_over(self.days_elapsed) {
                info!(
                    days_elapsed = self.days_elapsed,
                    cities_held = ?self.world.score.cities_held,
                    "game over"
                );
                let _ = self.world.send(Message::TimeChanged);
                let _ = self.world.send(Message::GameOver);
                return false;
            }
        }
        true
    }

    fn every_hour(&mut self) -> bool {
        self.is_night = is_night_at(self.hour, self.month);
        if self.hour == 12 && !self.every_12_hours() {
            return false;
        }
        if self.world.data.avg_daily_supply_use > self.world.rand(24) {
            let data = &self.world.data;
            for unit in self.world.units.iter_mut() {
                if unit.in_game && data.unit_uses_supplies[unit.unit_type] && unit.supply_level > 0 {
                    unit.supply_level -= 1;
                }
            }
        }
        true
    }

    fn every_12_hours(&mut self) -> bool {
        let mut reinforcements = [false; 2];
        for side in 0..2 {
            self.supply_levels[side] += self.world.data.resupply_rate[side] * 2;
        }
        self.hide_all_units();
        // Supplies move at night, except in Vietnam where they move by day.
        let resupply = if self.world.game == Game::Conflict {
            !self.is_night
        } else {
            self.is_night
        };
        if resupply {
            let _ = self.world.send(Message::SupplyDistributionStart);
        }
        for side in 0..2 {
            for index in 0..self.world.units.side(side).len() {
                let mut unit = self.world.units.get(side, index);
                if unit.in_game {
                    if resupply {
                        unit = resupply_unit(&mut self.world, unit, &mut self.supply_levels);
                    }
                } else {
                    if unit.half_days_until_appear == 0 {
                        continue;
                    }
                    unit.half_days_until_appear -= 1;
                    if unit.half_days_until_appear == 0 {
                        if self.should_spawn(&unit) {
                            unit.in_game = true;
                            reinforcements[side] = true;
                            debug!(side, index, xy = %unit.xy, "reinforcement arrives");
                        } else {
                            unit.half_days_until_appear = 1;
                        }
                    }
                }
                self.world.units.set(unit);
            }
        }
        for side in 0..2 {
            for index in 0..self.world.units.side(side).len() {
                let mut unit = self.world.units.get(side, index);
                if !unit.has_supply_line {
                    continue;
                }
                let data = &self.world.data;
                let (men_limit, tank_limit) = (data.men_count_limit[unit.unit_type], data.tank_count_limit[unit.unit_type]);
                let (men_rate, tank_rate) = (data.men_replacement_rate[side], data.tank_replacement_rate[side]);
                if unit.men_count < men_limit {
                    unit.men_count += self.world.rand(men_rate + 32) / 32;
                }
                if unit.tank_count < tank_limit {
                    unit.tank_count += self.world.rand(tank_rate + 32) / 32;
                }
                self.world.units.set(unit);
            }
        }
        self.show_all_visible_units();
        if resupply {
            let _ = self.world.send(Message::SupplyDistributionEnd);
        }
        if reinforcements.iter().any(|r| *r) {
            return self.world.send(Message::Reinforcements { sides: reinforcements });
        }
        true
    }

    /// Whether an off-map unit whose countdown just ran out enters now.
    fn should_spawn(&mut self, unit: &Unit) -> bool {
        let free = !self.world.units.is_unit_at(unit.xy);
        let spawn = free && self.world.rand(unit.inv_appear_probability) == 0;
        let enemy_city = self
            .world
            .terrain
            .find_city_at(unit.xy)
            .is_some_and(|city| city.owner != unit.side);
        spawn && !enemy_city
    }

    fn every_day(&mut self) -> bool {
        self.days_elapsed += 1;
        self.flashback.record(&self.world.units);
        let active = self
            .world
            .units
            .iter()
            .filter(|unit| unit.in_game || !unit.has_supply_line)
            .count() as i32;
        self.update_quota = active * self.world.data.unit_updates_per_time_increment / 128 + 1;

        let r = self.world.rand(256);
        if r < 140 {
            let index = (4 * (self.month / 3) + r / 35) as usize;
            self.weather = i32::from(self.world.data.possible_weather[index]);
        }
        let _ = self.world.send(Message::WeatherForecast { weather: self.weather });
        if !self.every_12_hours() {
            return false;
        }
        let updates = self.world.data.data_updates;
        for update in updates.iter().filter(|update| update.day == self.days_elapsed) {
            self.world.data.update_data(update.offset, update.value);
        }
        let days_remaining = self.variants[self.selected_variant].length_in_days - self.days_elapsed + 1;
        debug!(
            day = self.days_elapsed,
            weather = self.weather,
            days_remaining,
            supply = ?self.supply_levels,
            quota = self.update_quota,
            "daily update"
        );
        let _ = self.world.send(Message::DailyUpdate {
            days_remaining,
            supply_levels: self.supply_levels,
        });
        self.ai.invalidate_maps();
        true
    }

    /// Let the player take over the other side's view in a hot-seat game.
    pub fn switch_sides(&mut self) {
        self.world.commander_flags.switch_sides();
    }

    /// Whether `unit` is drawn on the map.
    #[must_use]
    pub fn is_unit_visible(&self, unit: &Unit) -> bool {
        self.world.is_unit_visible(unit)
    }

    /// Remove every unit from the overlay.
    pub fn hide_all_units(&mut self) {
        self.all_units_hidden = true;
        self.world.hide_all_units();
    }

    /// Put every visible unit back on the overlay.
    pub fn show_all_visible_units(&mut self) {
        self.all_units_hidden = false;
        self.world.show_all_visible_units();
    }

    /// Whether units are currently hidden for supply distribution.
    #[must_use]
    pub const fn all_units_hidden(&self) -> bool {
        self.all_units_hidden
    }

    /// The world being simulated.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for hosts that issue orders.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The computer commander.
    #[must_use]
    pub const fn ai(&self) -> &Ai {
        &self.ai
    }

    /// Options the game was started with.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Current minute.
    #[must_use]
    pub const fn minute(&self) -> i32 {
        self.minute
    }

    /// Current hour.
    #[must_use]
    pub const fn hour(&self) -> i32 {
        self.hour
    }

    /// Current day of the month, 0-based.
    #[must_use]
    pub const fn day(&self) -> i32 {
        self.day
    }

    /// Current month, 0-based.
    #[must_use]
    pub const fn month(&self) -> i32 {
        self.month
    }

    /// Name of the current month.
    #[must_use]
    pub fn month_name(&self) -> &str {
        usize::try_from(self.month)
            .ok()
            .and_then(|month| self.world.data.months.get(month))
            .map_or("", String::as_str)
    }

    /// Current year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Days since the start.
    #[must_use]
    pub const fn days_elapsed(&self) -> i32 {
        self.days_elapsed
    }

    /// Whether it is night.
    #[must_use]
    pub const fn is_night(&self) -> bool {
        self.is_night
    }

    /// Current weather index.
    #[must_use]
    pub const fn weather(&self) -> i32 {
        self.weather
    }

    /// Name of the current weather.
    #[must_use]
    pub fn weather_name(&self) -> &str {
        usize::try_from(self.weather)
            .ok()
            .and_then(|weather| self.world.data.weather.get(weather))
            .map_or("", String::as_str)
    }

    /// Supply pool per side.
    #[must_use]
    pub const fn supply_levels(&self) -> [i32; 2] {
        self.supply_levels
    }

    /// Unit updates per tick.
    #[must_use]
    pub const fn update_quota(&self) -> i32 {
        self.update_quota
    }

    /// Men lost by `side`, in soldiers.
    #[must_use]
    pub fn men_lost(&self, side: usize) -> i32 {
        self.world.score.men_lost[side] * self.world.data.men_multiplier
    }

    /// Tanks lost by `side`, in vehicles.
    #[must_use]
    pub fn tanks_lost(&self, side: usize) -> i32 {
        self.world.score.tanks_lost[side] * self.world.data.tanks_multiplier
    }

    /// Victory points held by `side`.
    #[must_use]
    pub const fn cities_held(&self, side: usize) -> i32 {
        self.world.score.cities_held[side]
    }

    /// Daily position snapshots.
    #[must_use]
    pub const fn flashback(&self) -> &FlashbackHistory {
        &self.flashback
    }

    /// The variant being played.
    #[must_use]
    pub fn variant(&self) -> &Variant {
        &self.variants[self.selected_variant]
    }

    /// Index of the variant being played.
    #[must_use]
    pub const fn selected_variant(&self) -> usize {
        self.selected_variant
    }

    /// Side ahead and by how much (0..=4).
    #[must_use]
    pub fn winning_side_and_advantage(&self) -> (usize, i32) {
        self.world.score.winning_side_and_advantage(self.world.data.data174)
    }

    /// Result, difficulty and rank as seen by `player_side`.
    #[must_use]
    pub fn final_results(&self, player_side: usize) -> (i32, i32, i32) {
        self.world.score.final_results(
            player_side,
            self.world.commander_flags.player_controlled,
            self.world.data.data174,
        )
    }
}
