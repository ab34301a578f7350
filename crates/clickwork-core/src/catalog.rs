//! Catalog of immutable game definitions
//!
//! Order templates, boosts, equipment, team members, skills, and
//! achievements are configuration, not state: loaded once at process start
//! (built-in seed or a RON document) into a read-only registry that is
//! passed to the engine by reference. Nothing here mutates at runtime.

use crate::error::{Error, Result};
use crate::stats::StatBonus;
use crate::DefId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a levelable boost improves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostKind {
    /// Flat click power per level
    ClickPower,
    /// Reward percentage per level
    Reward,
    /// Passive-income percentage per level
    Passive,
}

/// Equipment slot families. Each family carries one effect type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Laptop,
    Phone,
    Tablet,
    Monitor,
    Chair,
}

impl Slot {
    /// All slots, in display order
    pub const ALL: [Slot; 5] = [
        Slot::Laptop,
        Slot::Phone,
        Slot::Tablet,
        Slot::Monitor,
        Slot::Chair,
    ];

    /// Stable lowercase name, used in storage keys
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Laptop => "laptop",
            Slot::Phone => "phone",
            Slot::Tablet => "tablet",
            Slot::Monitor => "monitor",
            Slot::Chair => "chair",
        }
    }

    /// Parse a stored slot name
    pub fn parse(s: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.as_str() == s)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A template an order assignment is stamped from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTemplate {
    pub code: DefId,
    pub title: String,
    /// Click requirement before level scaling and reductions
    pub base_clicks: i64,
    /// Minimum player level to take this order
    pub min_level: u32,
}

/// A permanently purchasable, levelable modifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostDef {
    pub code: DefId,
    pub name: String,
    pub kind: BoostKind,
    pub base_cost: i64,
    /// Geometric cost growth per level
    pub growth: f64,
    /// Effect magnitude gained per level
    pub step_value: f64,
}

/// A tiered equipment item. Owning and equipping are separate relations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub code: DefId,
    pub name: String,
    pub slot: Slot,
    pub tier: u8,
    pub bonus: StatBonus,
    pub price: i64,
    pub min_level: u32,
}

/// A hireable team role with geometric hire/upgrade costs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemberDef {
    pub code: DefId,
    pub name: String,
    pub base_income_per_minute: f64,
    pub base_cost: i64,
    pub growth: f64,
}

/// A trainable skill contributing a per-level stat bonus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDef {
    pub code: DefId,
    pub name: String,
    pub bonus_per_level: StatBonus,
    pub max_level: u32,
}

/// Lifetime metrics achievements can watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    LifetimeClicks,
    OrdersCompleted,
    Balance,
    Level,
    PassiveCollected,
    DailyClaims,
}

/// An unlockable milestone over one metric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDef {
    pub code: DefId,
    pub name: String,
    pub metric: Metric,
    pub threshold: i64,
}

/// The complete read-only definition registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub orders: IndexMap<DefId, OrderTemplate>,
    pub boosts: IndexMap<DefId, BoostDef>,
    pub items: IndexMap<DefId, ItemDef>,
    pub team: IndexMap<DefId, TeamMemberDef>,
    pub skills: IndexMap<DefId, SkillDef>,
    pub achievements: IndexMap<DefId, AchievementDef>,
}

/// On-disk catalog document (RON)
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    orders: Vec<OrderTemplate>,
    #[serde(default)]
    boosts: Vec<BoostDef>,
    #[serde(default)]
    items: Vec<ItemDef>,
    #[serde(default)]
    team: Vec<TeamMemberDef>,
    #[serde(default)]
    skills: Vec<SkillDef>,
    #[serde(default)]
    achievements: Vec<AchievementDef>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a RON document. Duplicate codes are a hard error.
    pub fn from_ron_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            ron::from_str(content).map_err(|e| Error::Catalog(e.to_string()))?;

        let mut catalog = Catalog::new();
        for order in file.orders {
            catalog.insert_order(order)?;
        }
        for boost in file.boosts {
            catalog.insert_boost(boost)?;
        }
        for item in file.items {
            catalog.insert_item(item)?;
        }
        for member in file.team {
            catalog.insert_team_member(member)?;
        }
        for skill in file.skills {
            catalog.insert_skill(skill)?;
        }
        for achievement in file.achievements {
            catalog.insert_achievement(achievement)?;
        }
        Ok(catalog)
    }

    fn insert_order(&mut self, def: OrderTemplate) -> Result<()> {
        if self.orders.contains_key(&def.code) {
            return Err(Error::Catalog(format!("duplicate order: {}", def.code)));
        }
        self.orders.insert(def.code.clone(), def);
        Ok(())
    }

    fn insert_boost(&mut self, def: BoostDef) -> Result<()> {
        if self.boosts.contains_key(&def.code) {
            return Err(Error::Catalog(format!("duplicate boost: {}", def.code)));
        }
        self.boosts.insert(def.code.clone(), def);
        Ok(())
    }

    fn insert_item(&mut self, def: ItemDef) -> Result<()> {
        if self.items.contains_key(&def.code) {
            return Err(Error::Catalog(format!("duplicate item: {}", def.code)));
        }
        self.items.insert(def.code.clone(), def);
        Ok(())
    }

    fn insert_team_member(&mut self, def: TeamMemberDef) -> Result<()> {
        if self.team.contains_key(&def.code) {
            return Err(Error::Catalog(format!("duplicate team member: {}", def.code)));
        }
        self.team.insert(def.code.clone(), def);
        Ok(())
    }

    fn insert_skill(&mut self, def: SkillDef) -> Result<()> {
        if self.skills.contains_key(&def.code) {
            return Err(Error::Catalog(format!("duplicate skill: {}", def.code)));
        }
        self.skills.insert(def.code.clone(), def);
        Ok(())
    }

    fn insert_achievement(&mut self, def: AchievementDef) -> Result<()> {
        if self.achievements.contains_key(&def.code) {
            return Err(Error::Catalog(format!("duplicate achievement: {}", def.code)));
        }
        self.achievements.insert(def.code.clone(), def);
        Ok(())
    }

    /// Get an order template
    pub fn order(&self, code: &DefId) -> Option<&OrderTemplate> {
        self.orders.get(code)
    }

    /// Get a boost definition
    pub fn boost(&self, code: &DefId) -> Option<&BoostDef> {
        self.boosts.get(code)
    }

    /// Get an item definition
    pub fn item(&self, code: &DefId) -> Option<&ItemDef> {
        self.items.get(code)
    }

    /// Get a team member definition
    pub fn team_member(&self, code: &DefId) -> Option<&TeamMemberDef> {
        self.team.get(code)
    }

    /// Get a skill definition
    pub fn skill(&self, code: &DefId) -> Option<&SkillDef> {
        self.skills.get(code)
    }

    /// Get an achievement definition
    pub fn achievement(&self, code: &DefId) -> Option<&AchievementDef> {
        self.achievements.get(code)
    }

    /// Order templates a player of `level` may take
    pub fn orders_for_level(&self, level: u32) -> impl Iterator<Item = &OrderTemplate> {
        self.orders.values().filter(move |o| o.min_level <= level)
    }

    /// Achievement definitions watching any of the given metrics
    pub fn achievements_for(&self, metrics: &[Metric]) -> impl Iterator<Item = &AchievementDef> + '_ {
        let metrics = metrics.to_vec();
        self.achievements
            .values()
            .filter(move |a| metrics.contains(&a.metric))
    }

    /// The built-in seed catalog
    pub fn builtin() -> Self {
        let mut catalog = Catalog::new();

        let orders = [
            ("business_card", "Business card for a freelancer", 100, 1),
            ("social_cover", "Social network cover", 180, 1),
            ("cafe_logo", "Logo for a cafe", 300, 2),
            ("landing_page", "Landing page (one screen)", 600, 3),
            ("logo_redesign", "Logo redesign", 800, 4),
            ("brand_book", "Mini brand book", 1200, 5),
        ];
        for (code, title, base_clicks, min_level) in orders {
            catalog
                .insert_order(OrderTemplate {
                    code: code.into(),
                    title: title.to_string(),
                    base_clicks,
                    min_level,
                })
                .expect("builtin order codes are unique");
        }

        let boosts = [
            ("click_plus_one", "Click +1", BoostKind::ClickPower, 100, 1.25, 1.0),
            ("reward_plus_10", "Reward +10%", BoostKind::Reward, 300, 1.18, 0.10),
            ("passive_plus_10", "Passive income +10%", BoostKind::Passive, 400, 1.18, 0.10),
        ];
        for (code, name, kind, base_cost, growth, step_value) in boosts {
            catalog
                .insert_boost(BoostDef {
                    code: code.into(),
                    name: name.to_string(),
                    kind,
                    base_cost,
                    growth,
                    step_value,
                })
                .expect("builtin boost codes are unique");
        }

        let items = [
            ("laptop_t1", "Laptop T1", Slot::Laptop, 1, StatBonus::ClickPct(0.05), 250, 1),
            ("laptop_t2", "Laptop T2", Slot::Laptop, 2, StatBonus::ClickPct(0.10), 500, 2),
            ("laptop_t3", "Laptop T3", Slot::Laptop, 3, StatBonus::ClickPct(0.15), 900, 3),
            ("phone_t1", "Phone T1", Slot::Phone, 1, StatBonus::PassivePct(0.03), 200, 1),
            ("phone_t2", "Phone T2", Slot::Phone, 2, StatBonus::PassivePct(0.06), 400, 2),
            ("phone_t3", "Phone T3", Slot::Phone, 3, StatBonus::PassivePct(0.10), 700, 3),
            ("tablet_t1", "Tablet T1", Slot::Tablet, 1, StatBonus::RequirementPct(0.05), 220, 1),
            ("tablet_t2", "Tablet T2", Slot::Tablet, 2, StatBonus::RequirementPct(0.09), 480, 2),
            ("monitor_t1", "Monitor T1", Slot::Monitor, 1, StatBonus::RewardPct(0.05), 260, 1),
            ("monitor_t2", "Monitor T2", Slot::Monitor, 2, StatBonus::RewardPct(0.09), 520, 2),
            ("chair_t1", "Chair T1", Slot::Chair, 1, StatBonus::RateLimitAdd(1), 300, 1),
            ("chair_t2", "Chair T2", Slot::Chair, 2, StatBonus::RateLimitAdd(2), 600, 2),
        ];
        for (code, name, slot, tier, bonus, price, min_level) in items {
            catalog
                .insert_item(ItemDef {
                    code: code.into(),
                    name: name.to_string(),
                    slot,
                    tier,
                    bonus,
                    price,
                    min_level,
                })
                .expect("builtin item codes are unique");
        }

        let team = [
            ("junior", "Junior Designer", 4.0, 100),
            ("middle", "Middle Designer", 10.0, 300),
            ("senior", "Senior Designer", 22.0, 800),
            ("project_manager", "Project Manager", 35.0, 1200),
        ];
        for (code, name, base_income_per_minute, base_cost) in team {
            catalog
                .insert_team_member(TeamMemberDef {
                    code: code.into(),
                    name: name.to_string(),
                    base_income_per_minute,
                    base_cost,
                    growth: 1.22,
                })
                .expect("builtin team codes are unique");
        }

        let skills = [
            ("fast_hands", "Fast Hands", StatBonus::ClickPct(0.02), 10),
            ("negotiation", "Negotiation", StatBonus::RewardPct(0.03), 10),
            ("time_management", "Time Management", StatBonus::XpPct(0.05), 5),
        ];
        for (code, name, bonus_per_level, max_level) in skills {
            catalog
                .insert_skill(SkillDef {
                    code: code.into(),
                    name: name.to_string(),
                    bonus_per_level,
                    max_level,
                })
                .expect("builtin skill codes are unique");
        }

        let achievements = [
            ("first_click", "First Click", Metric::LifetimeClicks, 1),
            ("hundred_clicks", "Warmed Up", Metric::LifetimeClicks, 100),
            ("ten_thousand_clicks", "Carpal Tunnel", Metric::LifetimeClicks, 10_000),
            ("first_order", "First Commission", Metric::OrdersCompleted, 1),
            ("ten_orders", "Regular Contractor", Metric::OrdersCompleted, 10),
            ("fifty_orders", "Studio Veteran", Metric::OrdersCompleted, 50),
            ("level_five", "Getting Noticed", Metric::Level, 5),
            ("level_ten", "Portfolio Piece", Metric::Level, 10),
            ("ten_k_balance", "Rainy Day Fund", Metric::Balance, 10_000),
            ("passive_five_k", "Money While Sleeping", Metric::PassiveCollected, 5_000),
            ("daily_week", "Habit Formed", Metric::DailyClaims, 7),
        ];
        for (code, name, metric, threshold) in achievements {
            catalog
                .insert_achievement(AchievementDef {
                    code: code.into(),
                    name: name.to_string(),
                    metric,
                    threshold,
                })
                .expect("builtin achievement codes are unique");
        }

        catalog
    }
}
