//! Pinned locations and the targeting rule rewritten by the pipeline.

/// GitHub contents API listing of the vanilla behaviour pack entities.
pub const ENTITY_LISTING_URL: &str =
    "https://api.github.com/repos/Mojang/bedrock-samples/contents/behavior_pack/entities";
/// Tag of `Mojang/bedrock-samples` the entities are taken from.
pub const CONTENT_REF: &str = "v1.21.70.3";

/// Build directory name of the generated behaviour pack.
pub const PROJECT_NAME: &str = "Bouncyriceball_Passive_Mobs";
/// Human readable pack name, used as the pack directory.
pub const DISPLAY_NAME: &str = "Bouncyriceball's Passive Mobs";
/// Extension of entity definition files in the listing.
pub const ENTITY_FILE_EXTENSION: &str = ".json";

/// User agent sent with every request. GitHub rejects anonymous agents.
pub const USER_AGENT: &str = "passive-mobs/0.1";
/// Request timeout in seconds, matching the `reqwest` blocking default.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Root object of an entity definition.
pub const ENTITY_KEY: &str = "minecraft:entity";
/// Component choosing what a mob attacks on sight.
pub const NEAREST_ATTACKABLE_TARGET: &str = "minecraft:behavior.nearest_attackable_target";
/// Spawn category that makes an entity eligible.
pub const MONSTER_CATEGORY: &str = "monster";

/// Filter test matched by the rewrite.
pub const PLAYER_TEST: &str = "is_family";
/// Filter subject matched by the rewrite.
pub const PLAYER_SUBJECT: &str = "other";
/// Filter value matched by the rewrite.
pub const PLAYER_FAMILY: &str = "player";
/// Family no entity belongs to; targeting it targets nothing.
pub const VOID_FAMILY: &str = "void";
