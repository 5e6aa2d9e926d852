//! End-to-end runs of the pipeline against an in-memory entity source.

use std::fs;
use std::path::{Path, PathBuf};

use passive_mobs::{run_with, EntityFile, PipelineError, RunSummary};
use rstest::{fixture, rstest};
use serde_json::{json, Value};
use tempfile::TempDir;
use test_utils::{
    assert_all_absent, assert_all_present, family_filter, targeting, EntityJson, FakeSource,
};

const ZOMBIE: &str = r#"{"minecraft:entity":{"description":{"identifier":"ex:zombie","spawn_category":"monster","is_spawnable":true},"components":{"minecraft:behavior.nearest_attackable_target":{"entity_types":[{"filters":{"test":"is_family","subject":"other","value":"player"}}]}}}}"#;

struct Workspace {
    _dir: TempDir,
    out: PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir
        .path()
        .join("build")
        .join("Bouncyriceball_Passive_Mobs")
        .join("Bouncyriceball's Passive Mobs")
        .join("entities");
    Workspace { _dir: dir, out }
}

fn run(source: &FakeSource, out: &Path) -> (RunSummary, String) {
    let mut stdout = Vec::new();
    let summary = run_with(source, out, &mut stdout).expect("run should succeed");
    (summary, String::from_utf8(stdout).expect("utf-8 output"))
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("output file");
    serde_json::from_str(&text).expect("output is JSON")
}

#[rstest]
fn zombie_stops_targeting_players(workspace: Workspace) {
    let source = FakeSource::new().with_file("zombie.json", ZOMBIE);

    let (summary, stdout) = run(&source, &workspace.out);

    assert_eq!(stdout, "Modified: ex:zombie\n");
    assert_eq!(summary.modified, 1);
    let mut expected: Value = serde_json::from_str(ZOMBIE).expect("fixture is JSON");
    expected["minecraft:entity"]["components"]["minecraft:behavior.nearest_attackable_target"]
        ["entity_types"][0]["filters"]["value"] = json!("void");
    let written = fs::read_to_string(workspace.out.join("zombie.json")).expect("output file");
    assert_eq!(
        written,
        serde_json::to_string_pretty(&expected).expect("serialisable")
    );
}

#[rstest]
fn unspawnable_zombie_is_left_out(workspace: Workspace) {
    let text = ZOMBIE.replace("\"is_spawnable\":true", "\"is_spawnable\":false");
    let source = FakeSource::new().with_file("zombie.json", text);

    let (summary, stdout) = run(&source, &workspace.out);

    assert_eq!(stdout, "");
    assert_eq!(summary.skipped, 1);
    assert!(workspace.out.is_dir());
    assert_eq!(fs::read_dir(&workspace.out).expect("dir").count(), 0);
}

#[rstest]
fn mixed_batch_reports_each_file(workspace: Workspace) {
    let husk = EntityJson::monster("minecraft:husk")
        .with_description("spawn_category", json!("Monster"))
        .with_components(targeting(json!({"filters": {"any_of": [family_filter("player")]}})))
        .to_commented_text();
    let creeper = EntityJson::monster("minecraft:creeper")
        .with_components(targeting(json!([{"filters": family_filter("villager")}])))
        .to_commented_text();
    let anonymous = EntityJson::monster("unused")
        .without_description("identifier")
        .with_components(targeting(json!([{"filters": family_filter("player")}])))
        .to_commented_text();
    let cow = EntityJson::monster("minecraft:cow")
        .with_description("spawn_category", json!("creature"))
        .to_commented_text();
    let source = FakeSource::new()
        .with_file("husk.json", husk)
        .with_file("creeper.json", creeper)
        .with_file("anonymous.json", anonymous)
        .with_file("cow.json", cow)
        .with_failing_file("missing.json", 404)
        .with_file("garbled.json", "{\"minecraft:entity\": ")
        .with_entry(EntityFile::new("notes.md", FakeSource::url_for("notes.md")));

    let (summary, stdout) = run(&source, &workspace.out);

    assert_eq!(
        stdout.lines().take(4).collect::<Vec<_>>(),
        [
            "Modified: minecraft:husk",
            "Unmodified: minecraft:creeper",
            "Identifier not found in anonymous.json",
            "Failed to fetch missing.json. Status code: 404",
        ]
    );
    assert!(stdout
        .lines()
        .nth(4)
        .is_some_and(|line| line.starts_with("Failed to decode JSON for garbled.json. Error: ")));
    assert_eq!(
        summary,
        RunSummary {
            modified: 1,
            unmodified: 1,
            skipped: 2,
            failed: 2
        }
    );
    assert_all_absent(&stdout, &["cow", "notes.md"]);
    assert!(!source
        .fetched()
        .contains(&FakeSource::url_for("notes.md")));

    let names: Vec<_> = fs::read_dir(&workspace.out)
        .expect("dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(names, ["husk.json"]);
    let husk = read_json(&workspace.out.join("husk.json"));
    assert_eq!(
        husk["minecraft:entity"]["components"]["minecraft:behavior.nearest_attackable_target"]
            ["entity_types"]["filters"]["any_of"][0]["value"],
        "void"
    );
}

#[rstest]
fn component_groups_are_rewritten_and_comments_dropped(workspace: Workspace) {
    let enderman = EntityJson::monster("minecraft:enderman")
        .with_groups(json!({
            "minecraft:enderman_angry": targeting(json!([
                {"filters": {"all_of": [
                    {"test": "is_family", "subject": "other", "value": "endermite"},
                    {"any_of": [family_filter("player"), family_filter("snowgolem")]}
                ]}}
            ])),
            "minecraft:enderman_calm": {"minecraft:movement": {"value": 0.3}}
        }))
        .to_commented_text();
    let source = FakeSource::new().with_file("enderman.json", enderman);

    let (_, stdout) = run(&source, &workspace.out);

    assert_eq!(stdout, "Modified: minecraft:enderman\n");
    let text = fs::read_to_string(workspace.out.join("enderman.json")).expect("output file");
    assert_all_present(
        &text,
        &["\"void\"", "\"endermite\"", "\"snowgolem\"", "minecraft:enderman_calm"],
    );
    assert_all_absent(&text, &["generated fixture", "\"player\""]);
}

#[rstest]
fn listing_failure_is_fatal_and_keeps_previous_output(workspace: Workspace) {
    fs::create_dir_all(&workspace.out).expect("dir");
    fs::write(workspace.out.join("zombie.json"), "{}").expect("seed file");
    let source = FakeSource::new()
        .with_file("zombie.json", ZOMBIE)
        .with_listing_status(500);

    let err = run_with(&source, &workspace.out, Vec::new()).expect_err("listing failed");

    assert!(matches!(err, PipelineError::Listing(_)));
    assert!(source.fetched().is_empty());
    assert_eq!(
        fs::read_to_string(workspace.out.join("zombie.json")).expect("untouched"),
        "{}"
    );
}

#[rstest]
fn rerun_replaces_previous_output(workspace: Workspace) {
    let first = FakeSource::new().with_file("zombie.json", ZOMBIE);
    run(&first, &workspace.out);
    assert!(workspace.out.join("zombie.json").exists());

    let creeper = EntityJson::monster("minecraft:creeper").to_commented_text();
    let second = FakeSource::new().with_file("creeper.json", creeper);
    let (_, stdout) = run(&second, &workspace.out);

    assert_eq!(stdout, "Unmodified: minecraft:creeper\n");
    assert!(!workspace.out.join("zombie.json").exists());
}
