//! Item identifiers referenced by the damage rules
//!
//! Numeric ids match the game's shop data for the patch the damage tables
//! were built against; they are balance data, not logic.

use serde::{Deserialize, Serialize};

/// Numeric id of an ownable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

pub const DORANS_SHIELD: ItemId = ItemId(1054);
pub const DORANS_RING: ItemId = ItemId(1056);
pub const HUNTERS_MACHETE: ItemId = ItemId(1041);
pub const RECURVE_BOW: ItemId = ItemId(1043);
pub const KIRCHEIS_SHARD: ItemId = ItemId(2015);
pub const GUARDIANS_HORN: ItemId = ItemId(2051);
pub const INFINITY_EDGE: ItemId = ItemId(3031);
pub const NINJA_TABI: ItemId = ItemId(3047);
pub const SHEEN: ItemId = ItemId(3057);
pub const STATIKK_SHIV: ItemId = ItemId(3087);
pub const WITS_END: ItemId = ItemId(3091);
pub const REMNANT_OF_THE_WATCHERS: ItemId = ItemId(3092);
pub const RAPID_FIRECANNON: ItemId = ItemId(3094);
pub const STORMRAZOR: ItemId = ItemId(3095);
pub const FROSTFANG: ItemId = ItemId(3098);
pub const TARGONS_BRACE: ItemId = ItemId(3097);
pub const NASHORS_TOOTH: ItemId = ItemId(3115);
pub const GUINSOOS_RAGEBLADE: ItemId = ItemId(3124);
pub const SERRATED_DIRK: ItemId = ItemId(3134);
pub const BLADE_OF_THE_RUINED_KING: ItemId = ItemId(3153);
pub const SPELLTHIEFS_EDGE: ItemId = ItemId(3303);
pub const RELIC_SHIELD: ItemId = ItemId(3302);
pub const MIGHT_OF_THE_RUINED_KING: ItemId = ItemId(3379);
pub const REMNANT_OF_THE_ASPECT: ItemId = ItemId(3401);
pub const STALKERS_BLADE: ItemId = ItemId(3706);
pub const STALKERS_BLADE_BLOODRAZOR: ItemId = ItemId(3709);
pub const TRACKERS_KNIFE: ItemId = ItemId(3711);
pub const TRACKERS_KNIFE_BLOODRAZOR: ItemId = ItemId(3714);
pub const TITANIC_HYDRA: ItemId = ItemId(3748);
pub const TRINITY_FUSION: ItemId = ItemId(4403);
