mod common;

use common::{err_contains, ok, stamped};
use seiops::{PolicyVariant, TraversalMode};

const CHAIN: &str = r#"
[[class]]
name = "p.I"
kind = "interface"
super = "p.J"
[[class.method]]
name = "echo"
params = ["java.lang.String"]
[[class.method]]
name = "ping"

[[class]]
name = "p.J"
kind = "interface"
super = "p.K"
[[class.method]]
name = "ping"
[[class.method]]
name = "status"
params = ["int"]

[[class]]
name = "p.K"
kind = "interface"
[[class.method]]
name = "echo"
params = ["java.lang.String"]
[[class.method]]
name = "echo"
params = ["java.lang.String", "int"]
"#;

#[test]
fn union_of_super_interfaces_prefers_closest_declaration() {
    let result = ok(CHAIN, "p.I", PolicyVariant::Modern);
    assert_eq!(result.mode, TraversalMode::Interface);
    assert_eq!(
        stamped(&result),
        vec![
            "p.I#echo(java.lang.String)",
            "p.I#ping()",
            "p.J#status(int)",
            "p.K#echo(java.lang.String, int)",
        ]
    );
}

#[test]
fn interface_result_is_the_same_under_both_policies() {
    let legacy = ok(CHAIN, "p.I", PolicyVariant::Legacy);
    let modern = ok(CHAIN, "p.I", PolicyVariant::Modern);
    assert_eq!(legacy.operations, modern.operations);
}

#[test]
fn interfaces_expose_every_declared_method_without_filtering() {
    let src = r#"
[[class]]
name = "p.Api"
kind = "interface"
[[class.method]]
name = "excluded"
web_method = { exclude = true }
[[class.method]]
name = "helper"
static = true
[[class.method]]
name = "plain"
[[class.method]]
name = "named"
web_method = { operation_name = "Named" }
"#;
    let result = ok(src, "p.Api", PolicyVariant::Legacy);
    assert_eq!(result.method_names(), vec!["excluded", "helper", "plain", "named"]);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn terminal_root_ends_the_interface_walk() {
    let src = r#"
[[class]]
name = "p.Api"
kind = "interface"
super = "java.lang.Object"
[[class.method]]
name = "call"
"#;
    let result = ok(src, "p.Api", PolicyVariant::Modern);
    assert_eq!(stamped(&result), vec!["p.Api#call()"]);
}

#[test]
fn missing_super_interface_is_fatal() {
    let src = r#"
[[class]]
name = "p.Api"
kind = "interface"
super = "p.Gone"
"#;
    err_contains(src, "p.Api", PolicyVariant::Modern, "cannot resolve ancestor 'p.Gone' of 'p.Api'");
}

#[test]
fn cyclic_interfaces_are_fatal() {
    let src = r#"
[[class]]
name = "p.A"
kind = "interface"
super = "p.B"

[[class]]
name = "p.B"
kind = "interface"
super = "p.A"
"#;
    err_contains(src, "p.A", PolicyVariant::Modern, "cyclic hierarchy");
}
