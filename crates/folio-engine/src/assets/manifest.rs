use serde::{Deserialize, Serialize};

use crate::core::error::FolioError;

/// The static scripts the page animates: typewriter phrases and terminal scenarios.
/// Loaded from JSON at runtime, or the built-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptManifest {
    /// Phrases cycled by the typewriter, in order.
    #[serde(default)]
    pub phrases: Vec<String>,
    /// Terminal scenarios, replayed in order and looped.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// An ordered run of commands shown in one pass of the terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    pub commands: Vec<TerminalCommand>,
}

/// A simulated command and the output block printed after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalCommand {
    pub cmd: String,
    /// Output markup, inserted as-is.
    #[serde(default)]
    pub output: String,
}

impl TerminalCommand {
    pub fn new(cmd: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            output: output.into(),
        }
    }
}

impl ScriptManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ScriptManifest {
    fn default() -> Self {
        let phrases = [
            "Principal Cloud Ops Engineer",
            "AWS Architecture & Security",
            "Infrastructure Automation Expert",
            "DevOps & Cloud Architecture",
            "Enterprise Security & Compliance",
        ];

        let identity = Scenario {
            name: "identity".into(),
            commands: vec![
                TerminalCommand::new(
                    "aws sts get-caller-identity",
                    concat!(
                        "{\n",
                        "    <span class=\"key\">\"UserId\"</span>: <span class=\"value\">\"AROA3XFRBF47CLOUD0PS\"</span>,\n",
                        "    <span class=\"key\">\"Account\"</span>: <span class=\"value\">\"**** **** 9420\"</span>,\n",
                        "    <span class=\"key\">\"Arn\"</span>: <span class=\"value\">\"arn:aws:iam::role/PrincipalCloudOps\"</span>\n",
                        "}",
                    ),
                ),
                TerminalCommand::new(
                    "terraform --version",
                    "Terraform v1.9.5\non darwin_arm64\n+ provider registry.terraform.io/hashicorp/aws v5.82.0",
                ),
            ],
        };

        let cluster = Scenario {
            name: "cluster".into(),
            commands: vec![
                TerminalCommand::new("kubectl get nodes --no-headers | wc -l", "24 nodes ready"),
                TerminalCommand::new(
                    "helm list -n platform --short",
                    "ingress-nginx\ncert-manager\nexternal-dns",
                ),
            ],
        };

        Self {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            scenarios: vec![identity, cluster],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r#"{
            "phrases": ["Rustacean", "Builder"],
            "scenarios": [
                { "name": "hello", "commands": [
                    { "cmd": "echo hi", "output": "hi" },
                    { "cmd": "true" }
                ] }
            ]
        }"#;
        let manifest = ScriptManifest::from_json(json).unwrap();
        assert_eq!(manifest.phrases, vec!["Rustacean", "Builder"]);
        assert_eq!(manifest.scenarios.len(), 1);
        let cmds = &manifest.scenarios[0].commands;
        assert_eq!(cmds[0].output, "hi");
        assert_eq!(cmds[1].output, "");
    }

    #[test]
    fn empty_object_is_an_empty_manifest() {
        let manifest = ScriptManifest::from_json("{}").unwrap();
        assert!(manifest.phrases.is_empty());
        assert!(manifest.scenarios.is_empty());
    }

    #[test]
    fn missing_cmd_is_rejected() {
        let json = r#"{ "scenarios": [ { "commands": [ { "output": "x" } ] } ] }"#;
        assert!(ScriptManifest::from_json(json).is_err());
    }

    #[test]
    fn default_manifest_has_content() {
        let manifest = ScriptManifest::default();
        assert_eq!(manifest.phrases.len(), 5);
        assert!(manifest.scenarios.iter().all(|s| !s.commands.is_empty()));
    }
}
