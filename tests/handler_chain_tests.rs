use std::collections::HashMap;
use std::fs;

use seiops::handler::{select_handlers, HandlerChainFile, HandlerChainSource, PatternError, PortInfo, QName, QNamePattern};
use seiops::Error;
use tempfile::TempDir;

fn prefixes() -> HashMap<String, String> {
    let mut map = HashMap::new();
    map.insert("ns1".to_string(), "http://www.ibm.com".to_string());
    map
}

fn matches(pattern: &str, name: &QName) -> bool {
    QNamePattern::parse(pattern, &prefixes()).unwrap().matches(name)
}

#[test]
fn pattern_matching_table() {
    let service = QName::new("http://www.ibm.com", "EchoService");
    assert!(matches("*", &service));
    assert!(matches("ns1:EchoService", &service));
    assert!(matches("ns1:Echo*", &service));
    assert!(matches("ns1:*Service", &service));
    assert!(matches("ns1:E*o*e", &service));
    assert!(matches("EchoService", &service));
    assert!(!matches("ns1:EchoServiceX", &service));
    assert!(!matches("ns1:Foo*", &service));

    let elsewhere = QName::new("http://other", "EchoService");
    assert!(!matches("ns1:EchoService", &elsewhere));
    assert!(matches("Echo*", &elsewhere));
}

#[test]
fn malformed_patterns_are_rejected() {
    for bad in ["", "ns1:", ":Echo", "zz:Echo", "ns1:Echo Service", "ns1:a:b"] {
        let err = QNamePattern::parse(bad, &prefixes()).unwrap_err();
        assert!(matches!(err, PatternError::Malformed { .. }), "{:?} gave {}", bad, err);
    }
}

#[test]
fn reads_chains_from_disk_and_selects_per_port() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("handlers.toml");
    fs::write(
        &path,
        r###"
[namespaces]
ns1 = "http://www.ibm.com"

[[handler_chain]]
service_name_pattern = "ns1:Echo*"
[[handler_chain.handler]]
name = "First"
class = "com.ibm.FirstHandler"
soap_roles = ["http://roles/first"]
[[handler_chain.handler]]
name = "Second"
class = "com.ibm.SecondHandler"

[[handler_chain]]
protocol_bindings = ["##SOAP12_HTTP"]
[[handler_chain.handler]]
name = "Soap12"
class = "com.ibm.Soap12Handler"
"###,
    )
    .unwrap();

    let chains = HandlerChainFile::new(&path).handler_chains().unwrap();
    assert_eq!(chains.len(), 2);

    let port = PortInfo {
        service: QName::parse_clark("{http://www.ibm.com}EchoService").unwrap(),
        port: QName::parse_clark("{http://www.ibm.com}EchoPort").unwrap(),
        binding: "http://schemas.xmlsoap.org/wsdl/soap/http".to_string(),
    };
    let selection = select_handlers(&chains, &port);
    assert_eq!(selection.handler_classes, vec!["com.ibm.FirstHandler", "com.ibm.SecondHandler"]);
    assert_eq!(selection.soap_roles, vec!["http://roles/first"]);

    let soap12 = PortInfo { binding: "##SOAP12_HTTP".to_string(), ..port };
    let selection = select_handlers(&chains, &soap12);
    assert_eq!(
        selection.handler_classes,
        vec!["com.ibm.FirstHandler", "com.ibm.SecondHandler", "com.ibm.Soap12Handler"]
    );
}

#[test]
fn missing_and_malformed_files_fail() {
    let temp_dir = TempDir::new().unwrap();
    let err = HandlerChainFile::new(temp_dir.path().join("absent.toml")).handler_chains().unwrap_err();
    assert!(matches!(err, Error::Io(_)), "{}", err);

    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "[[handler_chain]]\nservice_name_pattern = \"nope:Svc\"\n").unwrap();
    let err = HandlerChainFile::new(&path).handler_chains().unwrap_err();
    assert!(err.to_string().contains("nope:Svc"), "{}", err);
}
