//! Resource cost shared by entities, upgrades and squad aggregates.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::tree::number_at;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceCost {
    pub fuel: f64,
    pub munition: f64,
    pub manpower: f64,
    pub popcap: f64,
    /// Build time in seconds. Always 0 for upkeep.
    pub time: f64,
}

impl ResourceCost {
    pub const ZERO: ResourceCost = ResourceCost {
        fuel: 0.0,
        munition: 0.0,
        manpower: 0.0,
        popcap: 0.0,
        time: 0.0,
    };

    /// Every field multiplied by `count`.
    pub fn scaled(&self, count: u32) -> ResourceCost {
        let n = f64::from(count);
        ResourceCost {
            fuel: self.fuel * n,
            munition: self.munition * n,
            manpower: self.manpower * n,
            popcap: self.popcap * n,
            time: self.time * n,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == ResourceCost::ZERO
    }

    /// Read a `time_cost` block: `{ cost: { fuel, munition, manpower, popcap }, time_seconds }`.
    pub fn from_time_cost(node: &Value) -> ResourceCost {
        let cost = node.get("cost").unwrap_or(&Value::Null);
        ResourceCost {
            time: number_at(node, &["time_seconds"]),
            ..ResourceCost::from_resources(cost)
        }
    }

    /// Read a flat `{ fuel, munition, manpower, popcap }` block.
    pub fn from_resources(node: &Value) -> ResourceCost {
        ResourceCost {
            fuel: number_at(node, &["fuel"]),
            munition: number_at(node, &["munition"]),
            manpower: number_at(node, &["manpower"]),
            popcap: number_at(node, &["popcap"]),
            time: 0.0,
        }
    }
}

impl Add for ResourceCost {
    type Output = ResourceCost;

    fn add(self, rhs: ResourceCost) -> ResourceCost {
        ResourceCost {
            fuel: self.fuel + rhs.fuel,
            munition: self.munition + rhs.munition,
            manpower: self.manpower + rhs.manpower,
            popcap: self.popcap + rhs.popcap,
            time: self.time + rhs.time,
        }
    }
}

impl AddAssign for ResourceCost {
    fn add_assign(&mut self, rhs: ResourceCost) {
        *self = *self + rhs;
    }
}
