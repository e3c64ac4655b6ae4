mod common;
use common::cli::{SqaWorkspace, demo_workspace, project_workspace, run_ok, run_sqa};

#[test]
fn init_seeds_demo_projects() {
    let workspace = demo_workspace();
    assert!(workspace.store_path().exists());
    assert!(workspace.data_dir().join("config.yaml").exists());

    let list = run_ok(&workspace, ["--json", "project", "list", "--all"], "list");
    let cards = list.json();
    let ids: Vec<&str> = cards
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["ecommerce-1", "banking-2", "portal-3", "api-4"]);
    assert_eq!(cards[0]["active"], true);
    assert_eq!(cards[0]["total"], 2);
}

#[test]
fn project_list_hides_archived_by_default() {
    let workspace = demo_workspace();
    let list = run_ok(&workspace, ["project", "list"], "list");
    assert!(list.stdout.contains("Customer Portal"));
    assert!(!list.stdout.contains("API Gateway"));
    assert!(list.stdout.contains("3 project(s)"));
}

#[test]
fn project_search_matches_description() {
    let workspace = demo_workspace();
    let list = run_ok(
        &workspace,
        ["--json", "project", "list", "--search", "NATIVE MOBILE"],
        "search",
    );
    let cards = list.json();
    assert_eq!(cards.as_array().unwrap().len(), 1);
    assert_eq!(cards[0]["id"], "banking-2");
}

#[test]
fn create_alpha_becomes_active() {
    let workspace = SqaWorkspace::new();
    run_ok(&workspace, ["init", "--empty"], "init");

    let created = run_ok(&workspace, ["--json", "project", "create", "Alpha"], "create");
    let card = created.json();
    assert_eq!(card["name"], "Alpha");
    assert_eq!(card["status"], "Active");
    assert_eq!(card["teamSize"], 1);
    assert_eq!(card["total"], 0);
    assert!(card["id"].as_str().unwrap().starts_with("prj-"));

    let show = run_ok(&workspace, ["--json", "project", "show"], "show");
    assert_eq!(show.json()["id"], card["id"]);
}

#[test]
fn blank_project_name_is_rejected() {
    let workspace = demo_workspace();
    let before = std::fs::read_to_string(workspace.store_path()).unwrap();

    let created = run_sqa(&workspace, ["project", "create", "   "], "create");
    assert!(!created.status.success());
    assert!(created.stderr.contains("name"));

    let after = std::fs::read_to_string(workspace.store_path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn select_switches_active_project() {
    let workspace = demo_workspace();
    run_ok(&workspace, ["project", "select", "banking-2"], "select");
    let show = run_ok(&workspace, ["project", "show"], "show");
    assert!(show.stdout.contains("Mobile Banking App (banking-2) *active*"));

    let missing = run_sqa(&workspace, ["project", "select", "nope"], "select missing");
    assert!(!missing.status.success());
    assert!(missing.stderr.contains("Project not found"));
}

#[test]
fn update_and_archive_project() {
    let workspace = demo_workspace();
    run_ok(
        &workspace,
        ["project", "update", "portal-3", "--team-size", "9", "--type", "desktop"],
        "update",
    );
    let show = run_ok(&workspace, ["--json", "project", "show", "portal-3"], "show");
    let card = show.json();
    assert_eq!(card["teamSize"], 9);
    assert_eq!(card["type"], "Desktop");

    run_ok(&workspace, ["project", "archive", "portal-3"], "archive");
    let show = run_ok(&workspace, ["--json", "project", "show", "portal-3"], "show");
    assert_eq!(show.json()["status"], "Archived");
}

#[test]
fn completion_percent_counts_closed_issues() {
    let workspace = project_workspace("Gamma");
    common::cli::add_issue(&workspace, "one", &["--status", "closed"]);
    common::cli::add_issue(&workspace, "two", &[]);
    common::cli::add_issue(&workspace, "three", &[]);

    let show = run_ok(&workspace, ["--json", "project", "show"], "show");
    let card = show.json();
    assert_eq!(card["total"], 3);
    assert_eq!(card["completionPercent"], 33);
    assert_eq!(card["byStatus"]["Closed"], 1);
    assert_eq!(card["byStatus"]["Open"], 2);
}

#[test]
fn data_dir_flag_overrides_env() {
    let workspace = SqaWorkspace::new();
    let other = workspace.path("elsewhere");
    run_ok(
        &workspace,
        ["--data-dir", other.to_str().unwrap(), "init", "--empty"],
        "init",
    );
    assert!(other.join("store.json").exists());
    assert!(!workspace.store_path().exists());
}
