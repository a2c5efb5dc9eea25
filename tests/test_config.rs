use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use webserv::config::{CONFIG_ENV, Config, parse_port_arg};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.static_root, PathBuf::from("game"));
    assert_eq!(cfg.max_routes, 2);
    assert_eq!(cfg.poll_interval(), Duration::from_millis(10));
}

#[test]
fn test_config_listen_addr() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr(8080), "0.0.0.0:8080");
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml(
        "host: \"127.0.0.1\"\nstatic_root: /srv/www\nmax_routes: 8\npoll_interval_ms: 25\n",
    )
    .unwrap();

    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.static_root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.max_routes, 8);
    assert_eq!(cfg.poll_interval(), Duration::from_millis(25));
}

#[test]
fn test_config_from_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml("max_routes: 16\n").unwrap();

    assert_eq!(cfg.max_routes, 16);
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.static_root, PathBuf::from("game"));
}

#[test]
fn test_config_from_invalid_yaml() {
    assert!(Config::from_yaml("max_routes: lots\n").is_err());
}

// Only this test touches the environment, so it cannot race with the others.
#[test]
fn test_config_load_from_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "host: \"127.0.0.1\"").unwrap();
    writeln!(file, "max_routes: 4").unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, file.path());
    }
    let cfg = Config::load();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.max_routes, 4);

    unsafe {
        std::env::set_var(CONFIG_ENV, "/definitely/not/here.yaml");
    }
    assert_eq!(Config::load(), Config::default());

    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }
    assert_eq!(Config::load(), Config::default());
}

#[test]
fn test_parse_port_arg() {
    assert_eq!(parse_port_arg(args(&["webserv", "8080"])), Ok(8080));
}

#[test]
fn test_parse_port_arg_usage_errors() {
    let usage = Err("USAGE:  webserv <server port>".to_string());

    assert_eq!(parse_port_arg(args(&["webserv"])), usage);
    assert_eq!(parse_port_arg(args(&["webserv", "80", "90"])), usage);
    assert_eq!(parse_port_arg(args(&["webserv", "http"])), usage);
    assert_eq!(parse_port_arg(args(&["webserv", "70000"])), usage);
}
