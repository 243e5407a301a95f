//! Order determination: what a unit should do next and where.

use tracing::trace;

use crate::coords::UnitCoords;
use crate::data::scenario::Game;
use crate::hex::{ith_neighbour, long_range_hex_neighbour_offset, small_map_offsets, tiny_map_offsets, STAY};
use crate::influence::{small_cell, TINY_MAP_SIZE};
use crate::math::{abs, clamp, in_range, max, min, sign};
use crate::units::{Order, Unit};
use crate::world::World;

use super::Ai;

/// Score every candidate must beat.
const WORST_SCORE: i32 = -17536;

/// Attack scores start here and lower is better.
const NO_ATTACK_SCORE: i32 = 16000;

/// Score of an attack candidate that holds nothing of interest.
const EMPTY_CELL_SCORE: i32 = 16001;

/// Weight of the `neighbour`-th square offset (0..9) as seen from `xy`.
///
/// Inside a 4x4 block the weight falls with distance. On the block edge
/// it favours offsets pointing out of the block towards the side the cell
/// sits on.
#[must_use]
pub fn proximity_weight(xy: UnitCoords, neighbour: usize) -> i32 {
    let (mut nx, mut ny) = small_map_offsets(neighbour);
    if in_range((xy.x / 2) % 4, 1, 3) && in_range(xy.y % 4, 1, 3) {
        return 9 - 2 * (abs(nx) + abs(ny));
    }
    if nx == 0 && ny == 0 {
        return 9;
    }
    let (sx, sy) = ((xy.x / 4) & 1, (xy.y / 2) & 1);
    if nx > 0 {
        nx += 1;
    }
    if ny > 0 {
        ny += 1;
    }
    let dx = if nx == 0 { 0 } else { abs(nx - sx) };
    let dy = if ny == 0 { 0 } else { abs(ny - sy) };
    10 - min(dx, dy) - 2 * max(dx, dy)
}

/// Result of the planning pass.
struct Plan {
    /// Order the objective search works for.
    mode: Order,
    /// Whether an objective still has to be picked.
    needs_objective: bool,
}

impl Plan {
    const fn done() -> Self {
        Self {
            mode: Order::Reserve,
            needs_objective: false,
        }
    }

    const fn search(mode: Order) -> Self {
        Self {
            mode,
            needs_objective: true,
        }
    }
}

impl Ai {
    /// Pick the unit's order and objective. Returns the score of the chosen
    /// objective, which later gates attacks.
    pub(super) fn update_unit_objective(&mut self, world: &mut World, unit: &mut Unit, weather: i32) -> i32 {
        let score = self.update_unit_objective_inner(world, unit, weather);
        self.last_analysed_side = unit.side;
        score
    }

    fn update_unit_objective_inner(&mut self, world: &mut World, unit: &mut Unit, weather: i32) -> i32 {
        let mut enemy_neighbours = world.units.neighbour_unit_count(unit.xy, 1 - unit.side);
        if enemy_neighbours == 0 {
            unit.state4 = false;
        }
        let plan = self.best_order(world, unit, &mut enemy_neighbours);
        if !plan.needs_objective {
            return 0;
        }
        let mut score = 0;
        unit.target_formation = world.data.order_formation(unit.order, 1);
        match plan.mode {
            Order::Attack => {
                let (objective, attack_score) =
                    best_attack_objective(world, *unit, weather, enemy_neighbours);
                if objective.x > 0 {
                    unit.objective = objective;
                    score = attack_score;
                }
            }
            Order::Reserve => unit.objective.x = 0,
            Order::Defend => {
                if unit.objective.x > 0 {
                    unit.objective = unit.xy;
                }
                let (objective, defence_score) = best_defence_objective(world, *unit);
                score = defence_score;
                if objective == unit.xy {
                    unit.target_formation = world.data.order_formation(unit.order, 1);
                } else {
                    unit.objective = objective;
                }
            }
            Order::Move => {}
        }
        check_long_range_attack(world, unit, weather);
        score
    }

    fn best_order(&mut self, world: &mut World, unit: &mut Unit, enemy_neighbours: &mut i32) -> Plan {
        if world.commander_flags.player_controlled[unit.side] {
            self.last_analysed_side = unit.side;
            if !unit.has_local_command
                && (unit.order == Order::Defend || unit.order == Order::Move || unit.objective.x != 0)
            {
                return Plan::done();
            }
            unit.has_local_command = true;
            return Plan::search(unit.order);
        }
        if unit.order_bit4 {
            return Plan::search(unit.order);
        }
        if self.last_analysed_side != unit.side {
            self.maps.rebuild(world, unit.side);
        }
        if let Some(plan) = self.strategic_relocation(world, unit) {
            return plan;
        }
        self.tactical_order(world, unit, enemy_neighbours)
    }

    /// Send the unit to another tiny cell when no enemy is close and a
    /// neighbouring area matters more than its own.
    fn strategic_relocation(&mut self, world: &mut World, unit: &mut Unit) -> Option<Plan> {
        let side = unit.side;
        let (sx, sy) = (unit.xy.x / 8, unit.xy.y / 4);
        let enemy_troops: i32 = (0..9)
            .filter_map(|i| {
                let (dx, dy) = small_map_offsets(i);
                small_cell(sx + dx, sy + dy).map(|(x, y)| self.maps.troops[1 - side][x][y])
            })
            .sum();
        let eligible = match world.game {
            Game::Conflict => !world.data.unit_mask_bit(unit.unit_type, 0),
            _ => world.data.unit_scores[unit.unit_type] <= 7,
        };
        if enemy_troops != 0 || !unit.has_supply_line || !eligible {
            return None;
        }
        let (tx, ty) = (unit.xy.x / 32, unit.xy.y / 16);
        let tiny = TINY_MAP_SIZE as i32;
        let mut best_value = WORST_SCORE;
        let mut best = None;
        for i in 0..9 {
            let (dx, dy) = tiny_map_offsets(i);
            let (x, y) = (tx + dx, ty + dy);
            if !in_range(x, 0, tiny) || !in_range(y, 0, tiny) {
                continue;
            }
            let (ux, uy) = (x as usize, y as usize);
            let maps = &self.maps;
            let mut value = (maps.tiny_importance[side][ux][uy] + maps.tiny_importance[1 - side][ux][uy])
                * 16
                / clamp(maps.tiny_troops[side][ux][uy] - maps.tiny_troops[1 - side][ux][uy], 10, 9999);
            value = value * proximity_weight(UnitCoords::new(unit.xy.x / 4, unit.xy.y / 4), i) / 8;
            if i == 0 {
                value *= 2;
            }
            if value > best_value {
                best_value = value;
                best = Some((i, ux, uy));
            }
        }
        let (i, bx, by) = best?;
        if i == 0 {
            return None;
        }
        unit.target_formation = 0;
        unit.order_bit4 = false;
        unit.order = Order::Reserve;
        let count = (unit.men_count + unit.tank_count + 8) / 16;
        let (ux, uy) = (tx as usize, ty as usize);
        self.maps.tiny_troops[side][ux][uy] = abs(self.maps.tiny_troops[side][bx][by] - count);
        self.maps.tiny_troops[side][bx][by] += count;
        unit.objective = UnitCoords::new(bx as i32 * 32 + 16, by as i32 * 16 + 8);
        if world.game == Game::Conflict {
            unit.objective.x += world.rand(3) * 2;
        }
        trace!(side, index = unit.index, objective = %unit.objective, "strategic relocation");
        Some(Plan::done())
    }

    /// Weigh the nine surrounding small cells and pick a tentative order.
    #[allow(clippy::too_many_lines)]
    fn tactical_order(&mut self, world: &mut World, unit: &mut Unit, enemy_neighbours: &mut i32) -> Plan {
        let side = unit.side;
        let enemy = 1 - side;
        let data = &world.data;
        let general = world.general(unit).clone();
        let (sx, sy) = (unit.xy.x / 8, unit.xy.y / 4);
        let (cx, cy) = (sx as usize, sy as usize);
        let mut own_weight = (unit.men_count + unit.tank_count + 4) / 8;
        let formation = unit.formation as usize;
        let mut own_strength = own_weight * max(data.formation_men_defence[formation], 8) / 8;
        own_strength = own_strength * data.terrain_men_defence[world.terrain_types.terrain_type_at(unit.xy)] / 8;
        if data.is_special_unit(unit.unit_type) {
            own_weight = 1;
            own_strength = 1;
        }
        let maps = &mut self.maps;
        maps.troops[side][cx][cy] = clamp(maps.troops[side][cx][cy] - own_weight, 0, 255);
        maps.strength[side][cx][cy] = clamp(maps.strength[side][cx][cy] - own_strength, 0, 255);

        // The scan works on a copy; only its fatigue is ever changed.
        let mut scan = *unit;
        let mut mode = Order::Reserve;
        let mut best_value = WORST_SCORE;
        let (mut best_dx, mut best_dy) = (0, 0);
        let mut stay_value = 0;
        for i in 0..=8usize {
            let (dx, dy) = small_map_offsets(i);
            let Some((x, y)) = small_cell(sx + dx, sy + dy) else {
                continue;
            };
            let (mut reinforce, mut threat, mut opportunity, mut retreat) = (0, 0, 0, 0);
            let mut friendly = maps.troops[side][x][y];
            let enemies_here = maps.troops[enemy][x][y];
            let mut friendly_strength = (friendly + maps.strength[side][x][y]) / 2;
            let enemy_strength = (enemies_here + maps.strength[enemy][x][y]) / 2;
            let mut enemies_around = maps.troops[enemy][x][y] / 2;
            for j in 1..=8 {
                let (ddx, ddy) = small_map_offsets(j);
                if let Some((ax, ay)) = small_cell(sx + dx + ddx, sy + dy + ddy) {
                    let mut v = maps.troops[enemy][ax][ay] / 4;
                    if j >= 5 {
                        v /= 2;
                    }
                    enemies_around += v;
                }
            }
            let mut candidate = if maps.strength[enemy][x][y] > 0 {
                Order::Attack
            } else {
                Order::Reserve
            };
            // First pass without the unit, second pass with it.
            for pass in 0..2usize {
                let mut odds = if friendly > enemy_strength {
                    clamp((friendly + 1) * 8 / (enemy_strength + 1) - 7, 0, 16)
                } else {
                    -clamp((enemy_strength + 1) * 8 / (friendly + 1) - 8, 0, 16)
                };
                odds += general.data1_high + data.data0_high[unit.unit_type];
                let cover = if friendly_strength > enemies_around {
                    clamp((friendly_strength + 1) * 8 / (enemies_around + 1) - 7, 0, 16)
                } else {
                    -clamp((enemies_around + 1) * 8 / (friendly_strength + 1) - 8, 0, 16)
                };
                if odds > 0 {
                    let mut v = odds * maps.importance[enemy][x][y];
                    if scan.seen {
                        v /= 2;
                    }
                    if general.data0_bit(2) {
                        v *= 2;
                    }
                    if general.data0_bit(6) {
                        v /= 2;
                    }
                    if pass > 0 {
                        v += maps.importance[side][x][y] * 8 / max(friendly, 1);
                    }
                    reinforce += v;
                }
                if cover < 0 {
                    candidate = Order::Reserve;
                    if enemies_here > 0 {
                        let mut v = maps.importance[side][x][y] * cover;
                        if general.data0_bit(1) {
                            v *= 2;
                        }
                        if general.data0_bit(5) {
                            v /= 2;
                        }
                        threat += v;
                    }
                }
                if odds > 0 {
                    if *enemy_neighbours > 0 {
                        candidate = Order::Attack;
                    }
                    if enemies_here > 0 {
                        let mut v = odds;
                        if general.data0_bit(3) {
                            v *= 2;
                        }
                        if general.data0_bit(7) {
                            v /= 2;
                        }
                        opportunity += v * enemies_here;
                    }
                }
                if cover < 0 {
                    if friendly > 0 {
                        candidate = Order::Defend;
                        let mut v = friendly * cover;
                        if general.data0_bit(0) {
                            v *= 2;
                        }
                        if general.data0_bit(4) {
                            v /= 2;
                        }
                        retreat += v;
                    }
                    if cover + general.data2_high + data.data0_low[unit.unit_type] < -9 && pass == i + 1 {
                        scan.fatigue += 256;
                    }
                }
                if pass == 0 {
                    reinforce = -reinforce;
                    threat = -threat;
                    opportunity = -opportunity;
                    retreat = -retreat;
                    friendly += own_weight;
                    friendly_strength += own_strength;
                }
            }
            let mut total = reinforce + threat + opportunity + retreat;
            if i == 0 && enemies_here > 0 && world.terrain.is_city_at(scan.xy) {
                *enemy_neighbours = 2;
            }
            let mut special = data.unit_scores[unit.unit_type] & 248;
            if scan.in_contact {
                special += scan.fatigue / 16 + scan.fatigue / 32;
            }
            if special > 7 {
                total = friendly_strength - enemy_strength * 2;
                *enemy_neighbours = -128;
                candidate = Order::Reserve;
                scan.fatigue &= 255;
            }
            total = total * proximity_weight(scan.xy, i) / 8;
            if i == 0 {
                stay_value = total;
                mode = candidate;
            }
            if total > best_value {
                best_value = total;
                best_dx = dx;
                best_dy = dy;
            }
            if i as i32 + 2 <= sign(mode.value()) + *enemy_neighbours {
                break;
            }
        }

        unit.order_bit4 = true;
        let mut supply_use = data.avg_daily_supply_use;
        if !unit.has_supply_line {
            supply_use *= 2;
        }
        if unit.supply_level < supply_use {
            let mut depot = world.units.get(side, unit.supply_unit);
            if !depot.in_game {
                depot = world.units.get(side, depot.supply_unit);
            }
            unit.objective = depot.xy;
            unit.order = if *enemy_neighbours > 0 {
                Order::Defend
            } else {
                Order::Move
            };
            unit.target_formation = 0;
            unit.order_bit4 = false;
            return Plan::done();
        }
        if world.game == Game::Conflict && data.unit_mask_bit(unit.unit_type, 0) {
            (best_dx, best_dy) = (0, 0);
        }
        if unit.fatigue * 4 > best_value - stay_value {
            (best_dx, best_dy) = (0, 0);
        }
        if best_dx == 0 && best_dy == 0 {
            if unit.fatigue > 64 || mode == Order::Reserve {
                mode = Order::Defend;
            }
            maps.troops[side][cx][cy] += own_weight;
            maps.strength[side][cx][cy] += own_strength;
        } else {
            let (bx, by) = ((sx + best_dx) as usize, (sy + best_dy) as usize);
            if maps.troops[side][bx][by] > 0 {
                maps.troops[side][bx][by] += own_weight / 2;
            }
            maps.strength[side][bx][by] += own_weight / 2;
            let oy = ((sy + best_dy) * 4 + world.rand(2) + 1) & 63;
            let ox = ((((sx + best_dx) * 4 + world.rand(2) + 1) * 2) + (oy & 1)) & 127;
            unit.objective = UnitCoords::new(ox, oy);
            mode = Order::Move;
            if *enemy_neighbours != 0 {
                unit.order = Order::Defend;
                return Plan::search(mode);
            }
        }
        unit.order = mode;
        Plan::search(mode)
    }
}

/// Best cell to attack from, or towards, among the long-range ring. Lower
/// scores are better.
fn best_attack_objective(world: &mut World, unit: Unit, weather: i32, enemy_neighbours: i32) -> (UnitCoords, i32) {
    let data = &world.data;
    let terrain_type = world.terrain_types.terrain_type_at(unit.xy);
    let men = data.terrain_men_attack[terrain_type] * unit.men_count;
    let tanks = data.terrain_tank_attack[terrain_type] * unit.tank_count * data.data16_high[unit.unit_type] / 4;
    let strength = (men + tanks) / 8 * (255 - unit.fatigue) / 256
        * (unit.morale + data.data0_high[unit.unit_type] * 16)
        / 128;
    let attack = strength * world.neighbour_score(&world.hexes.arr144, unit.xy, unit.side) / 8;
    let first = if enemy_neighbours > 0 && data.data200_low[unit.unit_type] < 3 {
        // Only direct neighbours.
        12
    } else {
        0
    };
    let mut best = UnitCoords::default();
    let mut best_score = NO_ATTACK_SCORE;
    for i in first..=18 {
        let (dx, dy) = long_range_hex_neighbour_offset(i);
        let nxy = UnitCoords::new(unit.xy.x + dx, unit.xy.y + dy);
        if !world.are_unit_coords_valid(nxy) {
            continue;
        }
        let mut score = EMPTY_CELL_SCORE;
        if let Some(target) = world.units.find_unit_of_side_at(nxy, 1 - unit.side) {
            let data = &world.data;
            let tt = world.terrain_types.terrain_type_at(target.xy);
            let men = data.terrain_men_defence[tt] * target.men_count;
            let tanks = data.terrain_tank_defence[tt] * target.tank_count * data.data16_low[target.unit_type] / 4;
            let defence = (men + tanks) * data.formation_men_defence[target.formation as usize] / 8;
            let mut w = weather;
            let ignores_weather = data.unit_mask_bit(unit.unit_type, 2);
            if world.game != Game::Conflict && ignores_weather {
                w /= 2;
            }
            if world.game == Game::Conflict && !ignores_weather {
                w *= 2;
            }
            let mut d = data.unit_scores[target.unit_type] + 14 - w;
            if target.under_attack {
                d += 4;
            }
            if target.state2 {
                d += 8;
            }
            let n = defence / clamp(d, 1, 32);
            score = n * world.neighbour_score(&world.hexes.arr144, target.xy, target.side) / 8
                * (255 - target.fatigue)
                / 256
                * target.morale
                / 128;
        } else if nxy == unit.xy || !world.contains_visible_unit(nxy) {
            let tt = world.terrain_types.terrain_type_at(nxy);
            if tt < 7 {
                let v = if unit.men_count > unit.tank_count {
                    world.data.terrain_men_attack[tt]
                } else {
                    world.data.terrain_tank_attack[tt]
                };
                world.units.get_mut(unit.side, unit.index).in_game = false;
                score = attack - world.neighbour_score(&world.hexes.arr48, nxy, unit.side) * 2 + v;
                world.units.get_mut(unit.side, unit.index).in_game = true;
            }
        }
        if i < 12 {
            score *= 2;
        }
        if let Some(city) = world.terrain.find_city_at(nxy) {
            if city.owner != unit.side {
                if world.units.is_unit_of_side_at(nxy, 1 - unit.side) {
                    score -= city.victory_points;
                } else {
                    score = -city.victory_points;
                }
            }
        }
        if score <= best_score {
            best_score = score;
            best = nxy;
        }
    }
    (best, best_score)
}

/// Best cell to hold among the unit's neighbours, biased towards staying.
fn best_defence_objective(world: &mut World, unit: Unit) -> (UnitCoords, i32) {
    world.units.get_mut(unit.side, unit.index).in_game = false;
    let general = world.general(&unit).clone();
    let mut best_score = WORST_SCORE;
    let mut best = 0;
    let mut stay_score = 0;
    for i in 0..=STAY {
        let nxy = ith_neighbour(unit.xy, i);
        if !world.are_unit_coords_valid(nxy) {
            continue;
        }
        let mut v = -128;
        if nxy == unit.xy || !world.contains_visible_unit(nxy) {
            let tt = world.terrain_types.terrain_type_at(nxy);
            if tt < 7 {
                let base = world.data.terrain_men_defence[tt];
                v = base;
                if world.game != Game::Conflict {
                    v += world.neighbour_score(&world.hexes.arr0, nxy, unit.side) * 2;
                }
                if let Some(city) = world.terrain.find_city_at(nxy) {
                    if !world.units.is_unit_of_side_at(nxy, unit.side) {
                        v += city.victory_points;
                    }
                }
                if world.data.is_special_unit(unit.unit_type) || unit.fatigue + general.data2_high * 4 > 96 {
                    v = base + world.neighbour_score(&world.hexes.arr96, nxy, unit.side) * 2;
                }
            }
        }
        if v >= best_score {
            best_score = v;
            best = i;
        }
        if i == STAY {
            stay_score = v;
        }
    }
    world.units.get_mut(unit.side, unit.index).in_game = true;
    let mut bias = world.data.formation_men_defence[unit.formation as usize] - 8;
    if world.commander_flags.player_controlled[unit.side] {
        bias *= 2;
    }
    if bias + stay_score > best_score {
        best = STAY;
    }
    (ith_neighbour(unit.xy, best), best_score)
}

/// Switch to a ranged attack on a random enemy that is already engaged
/// within reach.
fn check_long_range_attack(world: &mut World, unit: &mut Unit, weather: i32) {
    let range = world.data.attack_range(unit.unit_type) * 2;
    let susceptible = if world.game == Game::Conflict {
        world.data.weather_hampers_fire_alt(unit.unit_type)
    } else {
        world.data.weather_hampers_fire(unit.unit_type)
    };
    if range <= 0 || (susceptible && weather >= 2) || unit.fatigue / 4 >= 32 {
        return;
    }
    for _ in 0..=(32 - unit.fatigue / 4) {
        let slot = world.rand(64) as usize;
        let Some(&target) = world.units.side(1 - unit.side).get(slot) else {
            continue;
        };
        let in_reach = abs(unit.xy.x - target.xy.x) / 2 + abs(unit.xy.y - target.xy.y) <= range;
        let engaged = match world.game {
            Game::Conflict => target.seen,
            _ => target.under_attack || target.state2,
        };
        if in_reach && engaged {
            unit.objective = target.xy;
            unit.order = Order::Attack;
            unit.formation = world.data.data176[0][2];
        }
    }
}
