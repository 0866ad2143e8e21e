use kconfigstyle::config::LinterConfig;
use kconfigstyle::lint::Linter;
use kconfigstyle::models::ast::Entry;
use kconfigstyle::parser::{parse, scan, Node};

const ZEPHYR_SAMPLE: &str = "# Networking options
menuconfig NETWORKING
    bool \"Link layer and networking support\"
    select NET_BUF
    help
      This option enables generic networking support.



      Second paragraph.

if NETWORKING

config NET_IPV6
	bool \"IPv6\"
	default y
	depends on NET_L2_ETHERNET || NET_L2_IEEE802154 || NET_L2_BT || NET_L2_OPENTHREAD || NET_L2_PPP || NET_L2_VIRTUAL
	help
	  Enable IPv6 support.

choice NET_TC_MODE
	prompt \"Traffic class mode\"
	default NET_TC_MODE_SIMPLE

config NET_TC_MODE_SIMPLE
	bool \"Simple\"
endchoice

#comment without space
source \"subsys/net/l2/Kconfig\"
endif
";

const ESPIDF_SAMPLE: &str = "menu \"Wi-Fi\"

  config ESP_WIFI_ENABLED
    bool \"Enable Wi-Fi\"
    default y
    help
      Select this to enable Wi-Fi.

  config ESP_WIFI_STATIC_RX_BUFFER_NUM
	int \"Max number of WiFi static RX buffers\"
	range 2 25 if !SPIRAM_TRY_ALLOCATE_WIFI_LWIP
	default 10
	help
	    Set the number of WiFi static RX buffers.
endmenu
";

fn profiles() -> Vec<(&'static str, LinterConfig)> {
    let mut reflowing = LinterConfig::zephyr();
    reflowing.reflow_help_text = true;
    reflowing.max_line_length = 40;
    let mut consolidating = LinterConfig::espidf();
    consolidating.consolidate_empty_lines = true;
    vec![
        ("zephyr", LinterConfig::zephyr()),
        ("zephyr-reflow", reflowing),
        ("espidf", LinterConfig::espidf()),
        ("espidf-consolidate", consolidating),
    ]
}

fn samples() -> [&'static str; 2] {
    [ZEPHYR_SAMPLE, ESPIDF_SAMPLE]
}

fn format(config: &LinterConfig, content: &str) -> String {
    Linter::new(config.clone()).format_str(content).0.concat()
}

fn keywords(content: &str) -> Vec<&'static str> {
    let mut kinds: Vec<&'static str> = scan(content)
        .nodes
        .iter()
        .filter_map(|n| match n {
            Node::Statement(stmt) => Some(stmt.kind.as_str()),
            Node::Help(_) | Node::Blank { .. } => None,
        })
        .collect();
    kinds.sort_unstable();
    kinds
}

fn tree_keywords(entries: &[Entry], out: &mut Vec<&'static str>) {
    for e in entries {
        out.push(e.keyword());
        tree_keywords(e.children(), out);
    }
}

#[test]
fn formatting_is_idempotent() {
    for (name, config) in profiles() {
        for sample in samples() {
            let once = format(&config, sample);
            let twice = format(&config, &once);
            assert_eq!(once, twice, "profile {name} is not idempotent");
        }
    }
}

#[test]
fn formatted_output_lints_clean() {
    for (name, config) in [
        ("zephyr", LinterConfig::zephyr()),
        ("espidf", LinterConfig::espidf()),
    ] {
        for sample in samples() {
            let linter = Linter::new(config.clone());
            let (lines, leftover) = linter.format_str(sample);
            assert!(leftover.is_empty(), "{name}: {leftover:?}");
            let issues = linter.lint_str(&lines.concat());
            assert!(issues.is_empty(), "{name}: {issues:?}");
        }
    }
}

#[test]
fn formatting_preserves_statement_keywords() {
    for (_, config) in profiles() {
        for sample in samples() {
            let out = format(&config, sample);
            assert_eq!(keywords(sample), keywords(&out));
            let (mut before, mut after) = (Vec::new(), Vec::new());
            tree_keywords(&parse(sample), &mut before);
            tree_keywords(&parse(&out), &mut after);
            assert_eq!(before, after);
        }
    }
}

#[test]
fn long_dependencies_are_wrapped_within_limit() {
    let config = LinterConfig::zephyr();
    let out = format(&config, ZEPHYR_SAMPLE);
    let depends: Vec<&str> = out
        .lines()
        .skip_while(|l| !l.trim_start().starts_with("depends on"))
        .take_while(|l| !l.trim_start().starts_with("help"))
        .collect();
    assert!(depends.len() > 1);
    assert!(depends[0].starts_with("\tdepends on NET_L2_ETHERNET ||"));
    for l in &depends[..depends.len() - 1] {
        assert!(l.ends_with(" \\"), "{l:?}");
    }
    for l in &depends[1..] {
        assert!(l.starts_with("\t\t") && !l.starts_with("\t\t\t"));
    }
    let rejoined: Vec<&str> = depends
        .iter()
        .flat_map(|l| l.trim().trim_end_matches('\\').split_whitespace())
        .collect();
    let original: Vec<&str> = ZEPHYR_SAMPLE
        .lines()
        .find(|l| l.trim_start().starts_with("depends on"))
        .map(|l| l.split_whitespace().collect())
        .unwrap_or_default();
    assert_eq!(rejoined, original);
    assert!(out
        .lines()
        .all(|l| l.chars().count() <= config.max_line_length));
}

#[test]
fn reflowed_help_respects_width() {
    let mut config = LinterConfig::zephyr();
    config.reflow_help_text = true;
    config.max_line_length = 40;
    let out = format(&config, ZEPHYR_SAMPLE);
    let help: Vec<&str> = out
        .lines()
        .filter(|l| l.starts_with("\t  "))
        .collect();
    assert!(help.len() >= 3);
    assert!(help.iter().all(|l| l.chars().count() <= 40));
}

#[test]
fn espidf_nesting_and_closer_spacing() {
    let out = format(&LinterConfig::espidf(), ESPIDF_SAMPLE);
    let expected = "menu \"Wi-Fi\"

    config ESP_WIFI_ENABLED
        bool \"Enable Wi-Fi\"
        default y
        help
            Select this to enable Wi-Fi.

    config ESP_WIFI_STATIC_RX_BUFFER_NUM
        int \"Max number of WiFi static RX buffers\"
        range 2 25 if !SPIRAM_TRY_ALLOCATE_WIFI_LWIP
        default 10
        help
            Set the number of WiFi static RX buffers.

endmenu
";
    assert_eq!(out, expected);
}
