//! Centralized balance and tuning constants for the trail simulation.
//!
//! These values define the deterministic math for the turn engine. The
//! difficulty curve depends on every one of them, so they live in code
//! rather than in external data assets.

// Run budget ---------------------------------------------------------------
pub const TOTAL_DISTANCE: i32 = 2_040;
pub const MAX_TURNS: u32 = 20;
pub const DAYS_PER_TURN: i64 = 14;
/// Family savings before the wagon is bought.
pub const SAVINGS: i32 = 900;
pub const WAGON_COST: i32 = 200;
pub const AVAILABLE_MONEY: i32 = SAVINGS - WAGON_COST;

// Outfitting ---------------------------------------------------------------
pub const OXEN_MIN_SPEND: i32 = 200;
pub const OXEN_MAX_SPEND: i32 = 300;
pub const BULLETS_PER_DOLLAR: i32 = 50;

// Ledger -------------------------------------------------------------------
pub const DOCTOR_BILL: i32 = 20;
pub const LOW_FOOD_THRESHOLD: i32 = 13;
pub const STOP_MILEAGE_COST: i32 = 45;
pub const FORT_PRICE_NUMERATOR: i32 = 2;
pub const FORT_PRICE_DENOMINATOR: i32 = 3;

// Eating -------------------------------------------------------------------
pub const RATION_BASE: i32 = 8;
pub const RATION_PER_LEVEL: i32 = 5;
pub const FALLBACK_RATION: i32 = 13;

// Travel -------------------------------------------------------------------
pub const BASE_TRAVEL: i32 = 200;
pub const OXEN_BASELINE: i32 = 220;
pub const OXEN_SPEED_DIVISOR: i32 = 3;
pub const MOUNTAIN_START: i32 = 950;
pub const BLUE_MOUNTAINS_START: i32 = 1_700;

// Hunting ------------------------------------------------------------------
pub const HUNT_MIN_BULLETS: i32 = 40;
pub const HUNT_MISS_PCT_PER_GRADE: i32 = 13;
pub const HUNT_BIG_GAME_FOOD: i32 = 52;
pub const HUNT_BASE_BULLETS: i32 = 10;
pub const HUNT_BULLETS_PER_GRADE: i32 = 3;
pub const HUNT_CATCH_FOOD: i32 = 48;
pub const HUNT_FOOD_PER_GRADE: i32 = 2;

// Skill check --------------------------------------------------------------
pub const SHOT_BEST: i32 = 1;
pub const SHOT_MISS: i32 = 9;
pub const SHOT_SKILL_OFFSET: i32 = 2;

// Riders -------------------------------------------------------------------
pub const RIDER_FRIENDLY_CHANCE: f64 = 0.8;
pub const RIDER_FLIP_THRESHOLD: f64 = 0.2;
pub const RIDER_HOLD_FIRE_THRESHOLD: f64 = 0.8;
/// Gate curve: `((miles/100 - 4)^2 + 72) / ((miles/100 - 4)^2 + 12) - 1`.
pub const RIDER_GATE_CENTER: f64 = 4.0;
pub const RIDER_GATE_OFFSET: f64 = 72.0;
pub const RIDER_GATE_FLOOR: f64 = 60.0;
pub const RIDER_DRAW_SCALE: f64 = 10.0;

// Random events ------------------------------------------------------------
pub const EVENT_THRESHOLDS: [i32; 15] = [6, 11, 13, 15, 17, 22, 32, 35, 37, 42, 44, 54, 64, 69, 95];
pub const EVENT_DRAW_SCALE: f64 = 100.0;

// Mountains ----------------------------------------------------------------
pub const MOUNTAIN_LOST_CHANCE: f64 = 0.1;
pub const MOUNTAIN_DAMAGE_CHANCE: f64 = 0.11;
pub const SOUTH_PASS_CHANCE: f64 = 0.8;
pub const BLUE_MOUNTAINS_CHANCE: f64 = 0.7;
pub const MOUNTAIN_GATE_CENTER: f64 = 15.0;
pub const MOUNTAIN_GATE_OFFSET: f64 = 72.0;
pub const MOUNTAIN_GATE_DIVISOR_OFFSET: f64 = 12.0;
pub const MOUNTAIN_GATE_CEILING: f64 = 9.0;
pub const MOUNTAIN_DRAW_SCALE: f64 = 10.0;
pub const MOUNTAIN_LOST_MILES: i32 = 60;
pub const SLOW_GOING_BASE: i32 = 45;
pub const SLOW_GOING_STEP: f64 = 0.02;
pub const BLIZZARD_CLOTHING_BASE: i32 = 18;

// Illness ------------------------------------------------------------------
pub const ILLNESS_MILD_BASE: i32 = 10;
pub const ILLNESS_MILD_PER_LEVEL: i32 = 35;
pub const ILLNESS_SERIOUS_SCALE: f64 = 40.0;
pub const ILLNESS_SERIOUS_BASE: f64 = 4.0;
pub const ILLNESS_MILEAGE_COST: i32 = 5;
pub const ILLNESS_MEDICINE: i32 = 2;
pub const SERIOUS_ILLNESS_MEDICINE: i32 = 10;
