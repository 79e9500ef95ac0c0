//! Writes the ten-row sample fixtures the dashboard reads.
//!
//! Usage: `generate_sample [OUT_DIR]` (default `data/sample`).

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use imgo_dashboard::data::loader::{
    self, CONTROLS_FILE, MAPPINGS_FILE, PATHS_FILE, REQUIREMENTS_FILE, TECHNIQUES_FILE,
};
use imgo_dashboard::data::model::{
    ControlRecord, MappingRecord, PathNode, PathRecord, PathSubject, RequirementRecord,
    TechniqueRecord,
};

fn controls() -> Vec<ControlRecord> {
    let rows = [
        ("AC-2", "Access Control", "Account Management", "Manage system accounts, including establishing, activating, modifying, reviewing, disabling, and removing accounts.", "P1", 13.2),
        ("AC-17", "Access Control", "Remote Access", "Establish and document usage restrictions, configuration requirements, and implementation guidance for each type of remote access allowed.", "P1", 15.8),
        ("AT-2", "Awareness and Training", "Literacy Training and Awareness", "Provide security and privacy literacy training to system users, including recognizing and reporting social engineering.", "P1", 12.1),
        ("AU-6", "Audit and Accountability", "Audit Record Review, Analysis, and Reporting", "Review and analyze system audit records for indications of inappropriate or unusual activity.", "P1", 11.4),
        ("CM-7", "Configuration Management", "Least Functionality", "Configure the system to provide only mission-essential capabilities and prohibit unnecessary functions, ports, protocols, and services.", "P1", 16.3),
        ("IA-2", "Identification and Authentication", "Identification and Authentication (Organizational Users)", "Uniquely identify and authenticate organizational users and associate that identification with processes acting on their behalf.", "P1", 17.5),
        ("IR-4", "Incident Response", "Incident Handling", "Implement an incident handling capability that includes preparation, detection and analysis, containment, eradication, and recovery.", "P1", 14.6),
        ("RA-5", "Risk Assessment", "Vulnerability Monitoring and Scanning", "Monitor and scan for vulnerabilities in the system and hosted applications and remediate legitimate vulnerabilities.", "P1", 13.9),
        ("SC-7", "System and Communications Protection", "Boundary Protection", "Monitor and control communications at the external managed interfaces to the system and at key internal managed interfaces.", "P1", 15.1),
        ("SI-4", "System and Information Integrity", "System Monitoring", "Monitor the system to detect attacks and indicators of potential attacks and unauthorized local, network, and remote connections.", "P2", 10.7),
    ];
    rows.into_iter()
        .map(|(id, family, title, description, priority, fkgl)| ControlRecord {
            control_id: id.into(),
            family: family.into(),
            title: title.into(),
            description: description.into(),
            priority: priority.into(),
            fkgl_score: fkgl,
        })
        .collect()
}

fn techniques() -> Vec<TechniqueRecord> {
    let rows = [
        ("T1566", "Phishing", "Initial Access", "Adversaries send phishing messages to gain access to victim systems.", "Windows;Linux;macOS"),
        ("T1190", "Exploit Public-Facing Application", "Initial Access", "Adversaries exploit a weakness in an Internet-facing host or system to gain initial access.", "Windows;Linux;Network"),
        ("T1078", "Valid Accounts", "Defense Evasion", "Adversaries obtain and abuse credentials of existing accounts to gain access or persist.", "Windows;Linux;macOS;SaaS"),
        ("T1059", "Command and Scripting Interpreter", "Execution", "Adversaries abuse command and script interpreters to execute commands, scripts, or binaries.", "Windows;Linux;macOS"),
        ("T1053", "Scheduled Task/Job", "Persistence", "Adversaries abuse task scheduling functionality to facilitate recurring execution of malicious code.", "Windows;Linux;macOS"),
        ("T1110", "Brute Force", "Credential Access", "Adversaries use brute force techniques to gain access to accounts when passwords are unknown.", "Windows;Linux;macOS;SaaS"),
        ("T1021", "Remote Services", "Lateral Movement", "Adversaries use valid accounts to log into services that accept remote connections.", "Windows;Linux;macOS"),
        ("T1486", "Data Encrypted for Impact", "Impact", "Adversaries encrypt data on target systems to interrupt availability of system and network resources.", "Windows;Linux;macOS"),
        ("T1041", "Exfiltration Over C2 Channel", "Exfiltration", "Adversaries steal data by exfiltrating it over an existing command and control channel.", "Windows;Linux;macOS"),
        ("T1562", "Impair Defenses", "Defense Evasion", "Adversaries maliciously modify components of a victim environment to hinder or disable defensive mechanisms.", "Windows;Linux;macOS"),
    ];
    rows.into_iter()
        .map(|(id, name, tactic, description, platforms)| TechniqueRecord {
            technique_id: id.into(),
            name: name.into(),
            tactic: tactic.into(),
            description: description.into(),
            platforms: platforms.into(),
        })
        .collect()
}

fn requirements() -> Vec<RequirementRecord> {
    let rows = [
        ("GOVERN-1.1", "GOVERN", "Policies and Procedures", "GV-1.1", "Legal and regulatory requirements involving AI are understood, managed, and documented.", "PM-9;RA-1"),
        ("GOVERN-1.2", "GOVERN", "Policies and Procedures", "GV-1.2", "The characteristics of trustworthy AI are integrated into organizational policies, processes, and procedures.", "PM-9"),
        ("GOVERN-2.1", "GOVERN", "Accountability Structures", "GV-2.1", "Roles and responsibilities for mapping, measuring, and managing AI risks are documented and clear.", "PM-2;AC-2"),
        ("MAP-1.1", "MAP", "Context Establishment", "MP-1.1", "Intended purposes, potentially beneficial uses, and context-specific laws and norms are understood and documented.", "RA-2"),
        ("MAP-2.3", "MAP", "AI System Categorization", "MP-2.3", "Scientific integrity and TEVV considerations are identified and documented.", "RA-2;SA-11"),
        ("MEASURE-2.7", "MEASURE", "Trustworthiness Evaluation", "MS-2.7", "AI system security and resilience are evaluated and documented.", "RA-5;SI-4"),
        ("MEASURE-2.8", "MEASURE", "Trustworthiness Evaluation", "MS-2.8", "Risks associated with transparency and accountability are examined and documented.", "AU-6"),
        ("MEASURE-3.1", "MEASURE", "Risk Tracking", "MS-3.1", "Approaches and documentation are in place to regularly identify and track existing, unanticipated, and emergent AI risks.", "RA-3;SI-4"),
        ("MANAGE-2.4", "MANAGE", "Risk Response", "MG-2.4", "Mechanisms are in place to supersede, disengage, or deactivate AI systems that demonstrate performance inconsistent with intended use.", "IR-4;CM-7"),
        ("MANAGE-4.1", "MANAGE", "Post-Deployment Monitoring", "MG-4.1", "Post-deployment AI system monitoring plans are implemented, including mechanisms for capturing and evaluating input from users.", "SI-4;IR-4"),
    ];
    rows.into_iter()
        .map(|(id, function, category, subcategory, description, related)| RequirementRecord {
            requirement_id: id.into(),
            function: function.into(),
            category: category.into(),
            subcategory: subcategory.into(),
            description: description.into(),
            related_controls: related.into(),
        })
        .collect()
}

fn mappings() -> Vec<MappingRecord> {
    let rows = [
        ("AC-2", "T1078", "mitigates", 0.92),
        ("AC-17", "T1021", "mitigates", 0.88),
        ("AT-2", "T1566", "mitigates", 0.85),
        ("AU-6", "T1078", "detects", 0.74),
        ("CM-7", "T1059", "mitigates", 0.81),
        ("IA-2", "T1110", "mitigates", 0.90),
        ("IR-4", "T1486", "responds", 0.67),
        ("RA-5", "T1190", "mitigates", 0.79),
        ("SC-7", "T1041", "mitigates", 0.72),
        ("SI-4", "T1562", "detects", 0.63),
    ];
    rows.into_iter()
        .map(|(control, technique, kind, confidence)| MappingRecord {
            nist_control_id: control.into(),
            mitre_technique_id: technique.into(),
            mapping_type: kind.into(),
            mapping_confidence: confidence,
        })
        .collect()
}

fn node(id: &str, label: &str, kind: &str) -> PathNode {
    PathNode {
        node: id.into(),
        label: label.into(),
        kind: kind.into(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn paths() -> Vec<PathRecord> {
    vec![
        PathRecord {
            subject: PathSubject::Query {
                query: "Which controls mitigate phishing attacks?".into(),
            },
            nist_controls: strings(&["AT-2", "SI-4"]),
            mitre_techniques: strings(&["T1566"]),
            reasoning: "Phishing (T1566) targets users directly; literacy training (AT-2) reduces click-through while system monitoring (SI-4) detects follow-on activity.".into(),
            confidence: 0.87,
            path_length: 3,
            nodes: vec![
                node("T1566", "Phishing", "Technique"),
                node("AT-2", "Literacy Training and Awareness", "Control"),
                node("SI-4", "System Monitoring", "Control"),
            ],
        },
        PathRecord {
            subject: PathSubject::Query {
                query: "How is credential abuse detected?".into(),
            },
            nist_controls: strings(&["AC-2", "AU-6", "IA-2"]),
            mitre_techniques: strings(&["T1078", "T1110"]),
            reasoning: "Valid account abuse and brute force both leave authentication traces; account management, audit review and strong authentication together cover prevention and detection.".into(),
            confidence: 0.82,
            path_length: 4,
            nodes: vec![
                node("T1110", "Brute Force", "Technique"),
                node("IA-2", "Identification and Authentication", "Control"),
                node("T1078", "Valid Accounts", "Technique"),
                node("AU-6", "Audit Record Review", "Control"),
            ],
        },
        PathRecord {
            subject: PathSubject::Query {
                query: "What limits ransomware impact?".into(),
            },
            nist_controls: strings(&["IR-4", "CM-7"]),
            mitre_techniques: strings(&["T1486"]),
            reasoning: "Incident handling contains encryption events while least functionality narrows the execution surface available to ransomware payloads.".into(),
            confidence: 0.71,
            path_length: 5,
            nodes: Vec::new(),
        },
        PathRecord {
            subject: PathSubject::Endpoints {
                source: "SC-7".into(),
                target: "T1041".into(),
            },
            nist_controls: strings(&["SC-7"]),
            mitre_techniques: strings(&["T1041"]),
            reasoning: "Boundary protection inspects egress at managed interfaces, the point where exfiltration over an existing C2 channel becomes observable.".into(),
            confidence: 0.76,
            path_length: 2,
            nodes: vec![
                node("SC-7", "Boundary Protection", "Control"),
                node("T1041", "Exfiltration Over C2 Channel", "Technique"),
            ],
        },
        PathRecord {
            subject: PathSubject::Query {
                query: "Which AI RMF requirements rely on system monitoring?".into(),
            },
            nist_controls: strings(&["SI-4", "RA-5"]),
            mitre_techniques: strings(&["T1562", "T1190"]),
            reasoning: "MEASURE-2.7 and MANAGE-4.1 cite SI-4; monitoring also surfaces defense impairment and exploitation attempts that vulnerability scanning (RA-5) anticipates.".into(),
            confidence: 0.64,
            path_length: 3,
            nodes: vec![
                node("MANAGE-4.1", "Post-Deployment Monitoring", "Requirement"),
                node("SI-4", "System Monitoring", "Control"),
                node("T1562", "Impair Defenses", "Technique"),
            ],
        },
    ]
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/sample"));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    write_csv(&out_dir.join(CONTROLS_FILE), &controls())?;
    write_csv(&out_dir.join(TECHNIQUES_FILE), &techniques())?;
    write_csv(&out_dir.join(REQUIREMENTS_FILE), &requirements())?;
    write_csv(&out_dir.join(MAPPINGS_FILE), &mappings())?;

    let paths_file = out_dir.join(PATHS_FILE);
    let file = File::create(&paths_file)
        .with_context(|| format!("creating {}", paths_file.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &paths())
        .with_context(|| format!("writing {}", paths_file.display()))?;

    // The fixtures must pass the same validation the dashboard applies.
    let bundle = loader::load(&out_dir).context("re-loading generated fixtures")?;

    println!(
        "Wrote {} records to {}",
        bundle.len(),
        out_dir.display()
    );
    Ok(())
}
