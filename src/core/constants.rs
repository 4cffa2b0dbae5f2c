// Fight length
pub const MAX_TURNS: u32 = 15;

// Character attributes
pub const NUM_ATTRIBUTES: usize = 8;

// Max HP = max(MIN_MAX_HP, VIT × HP_PER_VITALITY)
pub const MIN_MAX_HP: u32 = 100;
pub const HP_PER_VITALITY: u32 = 10;

// Crit chance (percent) = BASE + AGI / AGI_DIVISOR + LUCK / LUCK_DIVISOR
pub const BASE_CRIT_CHANCE_PERCENT: f64 = 5.0;
pub const CRIT_CHANCE_AGILITY_DIVISOR: f64 = 10.0;
pub const CRIT_CHANCE_LUCK_DIVISOR: f64 = 15.0;
pub const MIN_CRIT_CHANCE_PERCENT: f64 = 0.0;
pub const MAX_CRIT_CHANCE_PERCENT: f64 = 50.0;

// Crit damage multiplier = BASE + STR / STR_DIVISOR
pub const BASE_CRIT_MULTIPLIER: f64 = 1.5;
pub const CRIT_MULTIPLIER_STRENGTH_DIVISOR: f64 = 500.0;
pub const MAX_CRIT_MULTIPLIER: f64 = 2.8;

// Dodge chance (percent) = BASE + AGI / AGI_DIVISOR
pub const BASE_DODGE_CHANCE_PERCENT: f64 = 3.0;
pub const DODGE_CHANCE_AGILITY_DIVISOR: f64 = 8.0;
pub const MAX_DODGE_CHANCE_PERCENT: f64 = 40.0;

// Armor reduction = armor / (armor + ARMOR_CURVE_CONSTANT), capped
pub const ARMOR_CURVE_CONSTANT: f64 = 100.0;
pub const MAX_ARMOR_REDUCTION: f64 = 0.75;

// Magic resist = wis / (wis + MAGIC_RESIST_CURVE_CONSTANT), capped
pub const MAGIC_RESIST_CURVE_CONSTANT: f64 = 150.0;
pub const MAX_MAGIC_RESIST: f64 = 0.70;

// Damage model
pub const PHYSICAL_DAMAGE_PER_STRENGTH: f64 = 2.0;
pub const MAGIC_DAMAGE_PER_INTELLIGENCE: f64 = 2.0;
pub const ENDURANCE_CURVE_CONSTANT: f64 = 100.0;
pub const DAMAGE_VARIANCE_MIN: f64 = 0.9;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.1;
pub const MIN_DAMAGE: u32 = 1;

// Body zone physical damage multipliers
pub const HEAD_DAMAGE_MULT: f64 = 1.3;
pub const TORSO_DAMAGE_MULT: f64 = 1.0;
pub const WAIST_DAMAGE_MULT: f64 = 0.9;
pub const LEGS_DAMAGE_MULT: f64 = 0.8;
pub const NUM_ZONES: usize = 4;

// Stance weights must sum to this total; an even stance puts a quarter on each zone
pub const STANCE_TOTAL_WEIGHT: u32 = 100;
pub const STANCE_EVEN_WEIGHT: u32 = STANCE_TOTAL_WEIGHT / NUM_ZONES as u32;

// Block: each weight point a zone sits below the even share adds this much block chance (percent)
pub const BLOCK_CHANCE_PER_GUARD_POINT: f64 = 2.0;
pub const BLOCK_DAMAGE_MULT: f64 = 0.5;

// Ability unlock levels, one per slot
pub const ABILITY_UNLOCK_LEVELS: [u32; 4] = [5, 10, 15, 20];
pub const BASIC_ATTACK_ID: &str = "basic";

// Log action ids for non-ability entries
pub const STATUS_TICK_ACTION: &str = "status_tick";
pub const STUN_ACTION: &str = "stun";
