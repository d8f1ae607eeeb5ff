use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use tempfile::TempDir;

fn pmatch_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("pmatch");
    path
}

fn write_config(root: &Path, port: u16, extra: &str) -> PathBuf {
    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[server]
bind = "127.0.0.1:{}"
{}
"#,
        port, extra
    );

    let config_path = config_dir.join("pmatch.toml");
    fs::write(&config_path, config_content).unwrap();
    config_path
}

/// Built-in catalog only, no remote source.
fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let config_path = write_config(tmp.path(), 7340, "");
    (tmp, config_path)
}

fn run_pmatch(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = pmatch_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run pmatch binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn run_json(config_path: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, success) = run_pmatch(config_path, args);
    assert!(success, "command failed: {:?}\nstderr={}", args, stderr);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid JSON from {:?}: {}\n{}", args, e, stdout))
}

fn ids(response: &Value) -> Vec<String> {
    response["organizations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap().to_string())
        .collect()
}

// ============ Search ============

#[test]
fn test_search_without_filters_returns_whole_catalog() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(&config_path, &["search", "--json"]);
    assert_eq!(resp["total"], 10);
    assert_eq!(resp["organizations"].as_array().unwrap().len(), 10);

    // Baseline ordering: verified bonus times confidence. Akshaya Patra
    // (55 x 0.96 = 52.8) leads.
    assert_eq!(ids(&resp)[0], "org-004");
    assert_eq!(resp["organizations"][0]["alignmentScore"], 53);
}

#[test]
fn test_search_total_matches_result_count() {
    let (_tmp, config_path) = setup_test_env();

    for args in [
        vec!["search", "--json", "--region", "southern"],
        vec!["search", "--json", "--verification-status", "pending"],
        vec!["search", "--json", "education"],
    ] {
        let resp = run_json(&config_path, &args);
        assert_eq!(
            resp["total"].as_u64().unwrap() as usize,
            resp["organizations"].as_array().unwrap().len(),
            "total mismatch for {:?}",
            args
        );
    }
}

#[test]
fn test_search_all_criteria_match() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(
        &config_path,
        &[
            "search",
            "--json",
            "--focus-area",
            "education & stem",
            "--region",
            "Southern",
            "--funding-type",
            "GRANT",
        ],
    );
    assert_eq!(ids(&resp), vec!["org-006"]);
    // 50 + 20 + 15 + 10 + 5 = 100, discounted by 0.91
    assert_eq!(resp["organizations"][0]["alignmentScore"], 91);
}

#[test]
fn test_search_query_matches_focus_area_substring() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(&config_path, &["search", "--json", "robotics"]);
    assert_eq!(ids(&resp), vec!["org-008"]);
}

#[test]
fn test_search_query_matches_description() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(&config_path, &["search", "--json", "HIMALAYAN"]);
    assert_eq!(ids(&resp), vec!["org-010"]);
}

#[test]
fn test_search_verification_filter() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(
        &config_path,
        &["search", "--json", "--verification-status", "pending"],
    );
    let mut found = ids(&resp);
    found.sort();
    assert_eq!(found, vec!["org-003", "org-008"]);
}

#[test]
fn test_search_no_match_is_empty_not_error() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(&config_path, &["search", "--json", "zzz-no-such-thing"]);
    assert_eq!(resp["total"], 0);
    assert!(resp["organizations"].as_array().unwrap().is_empty());

    let (stdout, _stderr, success) = run_pmatch(&config_path, &["search", "zzz-no-such-thing"]);
    assert!(success);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_search_sort_by_name() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(&config_path, &["search", "--json", "--sort-by", "name"]);
    let names: Vec<String> = resp["organizations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["name"].as_str().unwrap().to_lowercase())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names[0], "akshaya patra foundation");
}

#[test]
fn test_search_sort_by_confidence() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(&config_path, &["search", "--json", "--sort-by", "confidence"]);
    let confidences: Vec<f64> = resp["organizations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["confidence"].as_f64().unwrap())
        .collect();
    assert!(confidences.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(confidences[0], 96.0);
}

#[test]
fn test_search_sort_by_recency_keeps_catalog_order() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(&config_path, &["search", "--json", "--sort-by", "recency"]);
    let expected: Vec<String> = (1..=10).map(|i| format!("org-{:03}", i)).collect();
    assert_eq!(ids(&resp), expected);
}

#[test]
fn test_search_scores_within_bounds() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(&config_path, &["search", "--json", "--region", "india"]);
    for org in resp["organizations"].as_array().unwrap() {
        let score = org["alignmentScore"].as_u64().unwrap();
        assert!(score <= 100);
    }
}

#[test]
fn test_search_explain_breakdown() {
    let (_tmp, config_path) = setup_test_env();

    let resp = run_json(
        &config_path,
        &["search", "--json", "--explain", "--region", "northern"],
    );
    let first = &resp["organizations"][0];
    let explain = &first["explain"];
    assert_eq!(explain["base"], 50.0);
    assert_eq!(explain["regionBonus"], 15.0);
    assert_eq!(explain["finalScore"], first["alignmentScore"]);

    // Without --explain the breakdown is omitted.
    let resp = run_json(&config_path, &["search", "--json", "--region", "northern"]);
    assert!(resp["organizations"][0].get("explain").is_none());
}

#[test]
fn test_search_text_output() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_pmatch(&config_path, &["search", "--focus-area", "Waste Management"]);
    assert!(success, "search failed: {}", stderr);
    assert!(stdout.contains("Waste Warriors"));
    assert!(stdout.contains("id: org-010"));
}

#[test]
fn test_search_rejects_unknown_sort_on_cli() {
    let (_tmp, config_path) = setup_test_env();

    let (_stdout, _stderr, success) =
        run_pmatch(&config_path, &["search", "--sort-by", "popularity"]);
    assert!(!success);
}

// ============ Get ============

#[test]
fn test_get_returns_baseline_score() {
    let (_tmp, config_path) = setup_test_env();

    let org = run_json(&config_path, &["get", "org-001", "--json"]);
    assert_eq!(org["id"], "org-001");
    assert_eq!(org["name"], "Pratham Education Foundation");
    // (50 + 5) x 0.94 = 51.7
    assert_eq!(org["alignmentScore"], 52);

    // 50 x 0.65 = 32.5 rounds up
    let org = run_json(&config_path, &["get", "org-005", "--json"]);
    assert_eq!(org["alignmentScore"], 33);
}

#[test]
fn test_get_unknown_id_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_stdout, stderr, success) = run_pmatch(&config_path, &["get", "org-999"]);
    assert!(!success);
    assert!(
        stderr.contains("organization not found: org-999"),
        "got: {}",
        stderr
    );
}

#[test]
fn test_get_text_output() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _stderr, success) = run_pmatch(&config_path, &["get", "org-009"]);
    assert!(success);
    assert!(stdout.contains("Villgro Innovations"));
    assert!(stdout.contains("--- Mission ---"));
}

// ============ Static catalog override ============

#[test]
fn test_static_path_replaces_builtin_catalog() {
    let tmp = TempDir::new().unwrap();
    let catalog_path = tmp.path().join("orgs.json");
    fs::write(
        &catalog_path,
        r#"[{
            "id": "local-1",
            "name": "Local Food Bank",
            "type": "NGO",
            "mission": "Feed families",
            "description": "Weekly food distribution",
            "focusAreas": ["Food Security"],
            "region": "Eastern India",
            "headquarters": "Kolkata",
            "fundingType": "grant",
            "verificationStatus": "verified",
            "confidence": 100
        }]"#,
    )
    .unwrap();
    let config_path = write_config(
        tmp.path(),
        7340,
        &format!("[catalog]\nstatic_path = \"{}\"", catalog_path.display()),
    );

    let resp = run_json(&config_path, &["search", "--json", "--focus-area", "food security"]);
    assert_eq!(ids(&resp), vec!["local-1"]);
    // 50 + 20 + 5 at full confidence
    assert_eq!(resp["organizations"][0]["alignmentScore"], 75);
}

#[test]
fn test_invalid_static_catalog_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let catalog_path = tmp.path().join("orgs.json");
    fs::write(&catalog_path, "[{\"id\": \"broken\"}]").unwrap();
    let config_path = write_config(
        tmp.path(),
        7340,
        &format!("[catalog]\nstatic_path = \"{}\"", catalog_path.display()),
    );

    let (_stdout, stderr, success) = run_pmatch(&config_path, &["search"]);
    assert!(!success);
    assert!(stderr.contains("Invalid static catalog"), "got: {}", stderr);
}

// ============ Export / sources / focus areas ============

#[test]
fn test_export_to_file() {
    let (tmp, config_path) = setup_test_env();
    let out = tmp.path().join("out").join("organizations.json");

    let (_stdout, stderr, success) = run_pmatch(
        &config_path,
        &["export", "--output", out.to_str().unwrap()],
    );
    assert!(success, "export failed: {}", stderr);
    assert!(stderr.contains("Exported 10 organizations"));

    let data: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(data["total"], 10);
    assert!(data["generatedAt"].is_string());
    assert_eq!(data["organizations"][0]["id"], "org-001");
    assert_eq!(data["organizations"][0]["alignmentScore"], 52);
}

#[test]
fn test_export_to_stdout() {
    let (_tmp, config_path) = setup_test_env();

    let data = run_json(&config_path, &["export"]);
    assert_eq!(data["organizations"].as_array().unwrap().len(), 10);
}

#[test]
fn test_sources_without_remote() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _stderr, success) = run_pmatch(&config_path, &["sources"]);
    assert!(success);
    assert!(stdout.contains("static"));
    assert!(stdout.contains("built-in"));
    assert!(stdout.contains("DISABLED"));
}

#[test]
fn test_sources_reports_unreachable_remote() {
    let tmp = TempDir::new().unwrap();
    let dead_port = find_free_port();
    let config_path = write_config(
        tmp.path(),
        7340,
        &format!(
            "[remote]\nurl = \"http://127.0.0.1:{}\"\ntimeout_secs = 1",
            dead_port
        ),
    );

    let (stdout, _stderr, success) = run_pmatch(&config_path, &["sources"]);
    assert!(success);
    assert!(stdout.contains("UNHEALTHY"), "got: {}", stdout);
}

#[test]
fn test_search_degrades_when_remote_unreachable() {
    let tmp = TempDir::new().unwrap();
    let dead_port = find_free_port();
    let config_path = write_config(
        tmp.path(),
        7340,
        &format!(
            "[remote]\nurl = \"http://127.0.0.1:{}\"\ntimeout_secs = 1",
            dead_port
        ),
    );

    let resp = run_json(&config_path, &["search", "--json"]);
    assert_eq!(resp["total"], 10);
}

#[test]
fn test_focus_areas_needs_no_config() {
    let missing = PathBuf::from("/nonexistent/pmatch.toml");

    let (stdout, _stderr, success) = run_pmatch(&missing, &["focus-areas"]);
    assert!(success);
    assert!(stdout.contains("Education & STEM"));
    assert!(stdout.contains("  - STEM / Robotics"));
}

#[test]
fn test_missing_config_fails() {
    let missing = PathBuf::from("/nonexistent/pmatch.toml");

    let (_stdout, stderr, success) = run_pmatch(&missing, &["search"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}

// ============ HTTP server ============

/// Find an available port for the test server.
fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

struct ServerGuard(Child);

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn start_server() -> (TempDir, ServerGuard, String) {
    let port = find_free_port();
    let tmp = TempDir::new().unwrap();
    let config_path = write_config(tmp.path(), port, "");

    let child = Command::new(pmatch_binary())
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .arg("serve")
        .env("RUST_LOG", "warn")
        .spawn()
        .expect("Failed to start server");
    let guard = ServerGuard(child);

    let base = format!("http://127.0.0.1:{}", port);
    wait_for_server(&base);
    (tmp, guard, base)
}

fn wait_for_server(base: &str) {
    let client = reqwest::blocking::Client::new();
    let url = format!("{}/health", base);
    for _ in 0..50 {
        std::thread::sleep(std::time::Duration::from_millis(100));
        if let Ok(resp) = client.get(&url).send() {
            if resp.status().is_success() {
                return;
            }
        }
    }
    panic!("Server did not become ready within 5 seconds");
}

#[test]
fn test_server_health() {
    let (_tmp, _server, base) = start_server();

    let resp = reqwest::blocking::get(format!("{}/health", base)).unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[test]
fn test_server_search() {
    let (_tmp, _server, base) = start_server();

    let resp = reqwest::blocking::get(format!(
        "{}/api/search?focusArea=Education%20%26%20STEM&region=southern&fundingType=grant",
        base
    ))
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().unwrap();
    assert_eq!(ids(&body), vec!["org-006"]);
    assert_eq!(body["organizations"][0]["alignmentScore"], 91);
}

#[test]
fn test_server_search_tolerates_malformed_params() {
    let (_tmp, _server, base) = start_server();

    let resp = reqwest::blocking::get(format!(
        "{}/api/search?sortBy=popularity&region=&verificationStatus=",
        base
    ))
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().unwrap();
    assert_eq!(body["total"], 10);
    assert_eq!(ids(&body)[0], "org-004");
}

#[test]
fn test_server_search_unknown_verification_status_matches_nothing() {
    let (_tmp, _server, base) = start_server();

    for value in ["Verified", "VERIFIED", "maybe"] {
        let resp = reqwest::blocking::get(format!(
            "{}/api/search?verificationStatus={}",
            base, value
        ))
        .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().unwrap();
        assert_eq!(body["total"], 0, "verificationStatus={}", value);
    }

    let body: Value =
        reqwest::blocking::get(format!("{}/api/search?verificationStatus=verified", base))
            .unwrap()
            .json()
            .unwrap();
    assert_eq!(body["total"], 6);
}

#[test]
fn test_server_search_keeps_query_whitespace() {
    let (_tmp, _server, base) = start_server();

    let search = |query: &str| -> Value {
        reqwest::blocking::get(format!("{}/api/search?query={}", base, query))
            .unwrap()
            .json()
            .unwrap()
    };

    assert_eq!(ids(&search("Warriors")), vec!["org-010"]);
    // "Waste Warriors" ends the name, so a trailing space matches nothing.
    assert_eq!(search("Warriors%20")["total"], 0);
}

#[test]
fn test_server_search_explain() {
    let (_tmp, _server, base) = start_server();

    let body: Value = reqwest::blocking::get(format!("{}/api/search?query=robotics&explain=true", base))
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(body["total"], 1);
    assert!(body["organizations"][0]["explain"].is_object());
}

#[test]
fn test_server_get_organization() {
    let (_tmp, _server, base) = start_server();

    let resp = reqwest::blocking::get(format!("{}/api/organizations/org-010", base)).unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().unwrap();
    assert_eq!(body["name"], "Waste Warriors");
    assert_eq!(body["type"], "Social Enterprise");
    // 50 x 0.58
    assert_eq!(body["alignmentScore"], 29);
}

#[test]
fn test_server_get_unknown_organization() {
    let (_tmp, _server, base) = start_server();

    let resp = reqwest::blocking::get(format!("{}/api/organizations/nope", base)).unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().unwrap();
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "organization not found: nope");
}

#[test]
fn test_server_focus_areas() {
    let (_tmp, _server, base) = start_server();

    let body: Value = reqwest::blocking::get(format!("{}/api/focus-areas", base))
        .unwrap()
        .json()
        .unwrap();
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 12);
    assert!(categories[0]["areas"].as_array().unwrap().len() > 0);
}
