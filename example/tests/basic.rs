use std::path::PathBuf;

use clap::ValueEnum;
use conf2struct::{ClapArguments, Render, Status, config, run};
use serial_test::serial;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum MyEnum {
    A,
    B,
    C,
}

#[derive(Debug, Clone, PartialEq, clap::Args)]
struct TlsArgs {
    #[arg(long = "tls.cert", default_value = "cert.pem")]
    cert: String,
}

fn rendered(config: &dyn Render) -> String {
    String::from_utf8(config.render_to_vec().unwrap()).unwrap()
}

#[test]
#[serial]
fn test_eg_defaults() {
    unsafe {
        std::env::remove_var("EG_USER");
        std::env::remove_var("EG_LISTEN");
    }
    #[config("eg.toml")]
    struct EgConfig;

    let config = EgConfig::parse_from(["eg", "--user", "nobody"]);
    assert_eq!(config.user, "nobody");
    assert_eq!(config.verbose, 0);
    assert!(!config.foreground);
    assert_eq!(config.pidfile, None);
    assert_eq!(config.listen, vec!["0.0.0.0:443".to_string()]);
    assert_eq!(config.syslog_facility, Facility::Auth);
    assert_eq!(config.timeouts.connect, 2);
    assert_eq!(config.timeouts.udp, 60);

    assert_eq!(
        rendered(&config),
        "user: nobody\n\
         verbose: 0\n\
         foreground: false\n\
         pidfile: <unset>\n\
         listen: [0.0.0.0:443]\n\
         syslog_facility: Auth\n\
         timeouts:\n    connect: 2\n    udp: 60\n"
    );
}

#[test]
#[serial]
fn test_eg_flags() {
    unsafe {
        std::env::remove_var("EG_USER");
        std::env::remove_var("EG_LISTEN");
    }
    #[config("eg.toml")]
    struct EgConfig;

    let config = EgConfig::parse_from([
        "eg",
        "-u",
        "daemon",
        "-v",
        "3",
        "-f",
        "-P",
        "/run/eg.pid",
        "-p",
        "localhost:443",
        "-p",
        "[::]:8443",
        "--syslog-facility",
        "Local0",
        "--timeouts.connect",
        "5",
    ]);
    assert_eq!(config.user, "daemon");
    assert_eq!(config.verbose, 3);
    assert!(config.foreground);
    assert_eq!(config.pidfile, Some(PathBuf::from("/run/eg.pid")));
    assert_eq!(config.listen, ["localhost:443", "[::]:8443"]);
    assert_eq!(config.syslog_facility, Facility::Local0);
    assert_eq!(config.timeouts.connect, 5);
    assert_eq!(config.timeouts.udp, 60);

    let text = rendered(&config);
    assert!(text.contains("pidfile: /run/eg.pid\n"));
    assert!(text.contains("listen: [localhost:443, [::]:8443]\n"));
    assert!(text.contains("    connect: 5\n"));
}

#[test]
#[serial]
fn test_eg_env_fallback() {
    unsafe {
        std::env::set_var("EG_USER", "from-env");
        std::env::set_var("EG_LISTEN", "a:1,b:2");
    }
    #[config("eg.toml")]
    struct EgConfig;

    let config = EgConfig::try_parse_from(["eg"]);
    unsafe {
        std::env::remove_var("EG_USER");
        std::env::remove_var("EG_LISTEN");
    }
    let config = config.unwrap();
    assert_eq!(config.user, "from-env");
    assert_eq!(config.listen, ["a:1", "b:2"]);
}

#[test]
#[serial]
fn test_eg_runner() {
    unsafe {
        std::env::remove_var("EG_USER");
    }
    #[config("eg.toml")]
    struct EgConfig;
    let parser = ClapArguments::<EgConfig>::new();

    let mut out = Vec::new();
    assert_eq!(run(&parser, ["eg"], &mut out), Status::Failure);
    assert!(out.is_empty());

    let mut out = Vec::new();
    let status = run(&parser, ["eg", "--syslog-facility", "Kern", "-u", "x"], &mut out);
    assert_eq!(status, Status::Failure);
    assert!(out.is_empty());

    let mut out = Vec::new();
    assert_eq!(run(&parser, ["eg", "-u", "x"], &mut out), Status::Success);
    assert!(String::from_utf8(out).unwrap().starts_with("user: x\n"));
}

#[test]
#[serial]
fn test_option() {
    #[config("option.toml")]
    struct MyConfig;

    let config = MyConfig::parse_from(["option"]);
    assert_eq!(config.port, 9080);
    assert_eq!(config.op_with_default, Some(2));
    assert_eq!(config.op_without_default, None);
    assert_eq!(
        rendered(&config),
        "port: 9080\nop_with_default: 2\nop_without_default: <unset>\n"
    );

    let config = MyConfig::parse_from(["option", "--op_without_default", "7"]);
    assert_eq!(config.op_without_default, Some(7));
}

#[test]
#[serial]
fn test_multi_types() {
    #[config("multi_types.toml")]
    struct MyConfig;

    let config = MyConfig::parse_from(["multi", "--boolean"]);
    assert_eq!(config.small_int, 80);
    assert_eq!(config.int, 8000);
    assert_eq!(config.float, 90.8);
    assert!(config.boolean);
    assert_eq!(config.string, "string_value");
    assert_eq!(config.path, PathBuf::from("."));
    assert_eq!(config.letter, 'x');
    assert_eq!(config.ports, [80, 443]);
    assert_eq!(config.mode, MyEnum::B);

    let config = MyConfig::parse_from(["multi", "--mode", "c", "--ports", "8080"]);
    assert_eq!(config.mode, MyEnum::C);
    assert_eq!(config.ports, [8080]);
    assert!(!config.boolean);
}

#[test]
#[serial]
fn test_inner_types() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("REDIS_URL");
    }
    #[config("config_with_inner.toml")]
    struct MyConfig;

    let config = MyConfig::parse_from(["inner"]);
    assert_eq!(config.port, 8080);
    assert_eq!(config.url, "localhost".to_string());
    assert_eq!(config.redis.url, "redis://localhost:6379".to_string());
    assert_eq!(config.redis.pool_size, 10);

    let config = MyConfig::parse_from(["inner", "--redis.pool_size", "32", "--url", "example.org"]);
    assert_eq!(config.url, "example.org");
    assert_eq!(config.redis.pool_size, 32);
    assert_eq!(
        rendered(&config),
        "port: 8080\n\
         url: example.org\n\
         redis:\n    url: redis://localhost:6379\n    pool_size: 32\n"
    );
}

#[test]
#[serial]
fn test_inner_types_with_env() {
    unsafe {
        std::env::set_var("PORT", "5432");
        std::env::set_var("REDIS_URL", "redis://cache:6379");
    }
    #[config("config_with_inner.toml")]
    struct MyConfig;
    let config = MyConfig::parse_from(["inner"]);
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("REDIS_URL");
    }
    assert_eq!(config.port, 5432);
    assert_eq!(config.redis.url, "redis://cache:6379");
}

#[test]
#[serial]
fn test_url_not_provided() {
    unsafe {
        std::env::remove_var("URL");
    }
    #[config("config_not_provided.toml")]
    struct MyConfig;
    let config = MyConfig::try_parse_from(["required"]);

    assert!(config.is_err());
    unsafe {
        std::env::set_var("URL", "0.0.0.0");
    }

    let config = MyConfig::try_parse_from(["required"]);

    unsafe {
        std::env::remove_var("URL");
    }
    assert_eq!(config.unwrap().url, "0.0.0.0");
}

#[test]
#[serial]
fn test_external_args_and_optional_choice() {
    #[config("external.toml")]
    struct MyConfig;

    let config = MyConfig::parse_from(["external"]);
    assert_eq!(
        config.tls,
        TlsArgs {
            cert: "cert.pem".to_string()
        }
    );
    assert_eq!(config.mode, None);
    assert_eq!(config.retries, 3);
    assert_eq!(
        rendered(&config),
        "tls: TlsArgs { cert: \"cert.pem\" }\nmode: <unset>\nretries: 3\n"
    );

    let config = MyConfig::parse_from(["external", "--tls.cert", "c.pem", "--mode", "Slow"]);
    assert_eq!(config.tls.cert, "c.pem");
    assert_eq!(config.mode, Some(Mode::Slow));
    assert_eq!(
        rendered(&config),
        "tls: TlsArgs { cert: \"c.pem\" }\nmode: Slow\nretries: 3\n"
    );

    assert!(MyConfig::try_parse_from(["external", "--mode", "Medium"]).is_err());
}
