//! Built-in curated control mappings.
//!
//! Framework ids match the bundled framework catalogs. The set covers common
//! overlaps only and is meant to be extended at runtime from a mapping file.

use cf_core::entities::ControlMapping;
use cf_core::enums::MappingStrength;
use cf_core::enums::MappingStrength::{Partial, Related, Strong};

pub const NIST_CSF_2: &str = "nist-csf-2.0";
pub const ISO_27001_2022: &str = "iso-27001-2022";
pub const SOC2_2017: &str = "soc2-2017";
pub const CIS_V8: &str = "cis-v8";

type Row = (
    &'static str,
    (&'static str, &'static str),
    (&'static str, &'static str),
    MappingStrength,
    &'static str,
);

const ROWS: &[Row] = &[
    (
        "cm-001",
        (NIST_CSF_2, "GV.PO-01"),
        (ISO_27001_2022, "A.5.1"),
        Strong,
        "Both require an established, communicated information security policy.",
    ),
    (
        "cm-002",
        (NIST_CSF_2, "GV.RR-02"),
        (ISO_27001_2022, "A.5.2"),
        Strong,
        "Both assign and communicate security roles and responsibilities.",
    ),
    (
        "cm-003",
        (NIST_CSF_2, "ID.AM-01"),
        (ISO_27001_2022, "A.5.9"),
        Strong,
        "Both require an inventory of hardware and associated assets.",
    ),
    (
        "cm-004",
        (NIST_CSF_2, "ID.RA-01"),
        (ISO_27001_2022, "A.8.8"),
        Strong,
        "Both cover identifying and managing technical vulnerabilities.",
    ),
    (
        "cm-005",
        (NIST_CSF_2, "PR.AA-01"),
        (ISO_27001_2022, "A.5.16"),
        Strong,
        "Both govern the full lifecycle of identities and credentials.",
    ),
    (
        "cm-006",
        (NIST_CSF_2, "PR.AA-05"),
        (ISO_27001_2022, "A.5.15"),
        Strong,
        "Both define access permissions under least privilege.",
    ),
    (
        "cm-007",
        (NIST_CSF_2, "PR.AT-01"),
        (ISO_27001_2022, "A.6.3"),
        Strong,
        "Both require security awareness and training for personnel.",
    ),
    (
        "cm-008",
        (NIST_CSF_2, "PR.DS-11"),
        (ISO_27001_2022, "A.8.13"),
        Strong,
        "Both require backups to be created, protected, and tested.",
    ),
    (
        "cm-009",
        (NIST_CSF_2, "DE.CM-01"),
        (ISO_27001_2022, "A.8.16"),
        Strong,
        "Both require monitoring of networks for anomalous activity.",
    ),
    (
        "cm-010",
        (NIST_CSF_2, "RS.MA-01"),
        (ISO_27001_2022, "A.5.26"),
        Strong,
        "Both require executing the incident response plan once an incident is declared.",
    ),
    (
        "cm-011",
        (NIST_CSF_2, "RC.RP-01"),
        (ISO_27001_2022, "A.5.30"),
        Partial,
        "Recovery plan execution overlaps with ICT continuity readiness.",
    ),
    (
        "cm-012",
        (NIST_CSF_2, "PR.AA-05"),
        (SOC2_2017, "CC6.1"),
        Partial,
        "CC6.1 covers logical access broadly; PR.AA-05 focuses on permissions.",
    ),
    (
        "cm-013",
        (NIST_CSF_2, "PR.AA-01"),
        (SOC2_2017, "CC6.2"),
        Partial,
        "CC6.2 covers user registration and credential issuance.",
    ),
    (
        "cm-014",
        (NIST_CSF_2, "DE.CM-01"),
        (SOC2_2017, "CC7.2"),
        Strong,
        "Both require monitoring system components for anomalies.",
    ),
    (
        "cm-015",
        (NIST_CSF_2, "RS.MA-01"),
        (SOC2_2017, "CC7.4"),
        Strong,
        "Both require a defined incident response program to be executed.",
    ),
    (
        "cm-016",
        (NIST_CSF_2, "ID.RA-01"),
        (SOC2_2017, "CC7.1"),
        Partial,
        "CC7.1 includes vulnerability detection among configuration monitoring.",
    ),
    (
        "cm-017",
        (NIST_CSF_2, "GV.RM-01"),
        (SOC2_2017, "CC3.1"),
        Related,
        "Both address setting objectives that frame risk management.",
    ),
    (
        "cm-018",
        (ISO_27001_2022, "A.5.9"),
        (CIS_V8, "1.1"),
        Strong,
        "CIS 1.1 is a detailed enterprise asset inventory requirement.",
    ),
    (
        "cm-019",
        (ISO_27001_2022, "A.8.13"),
        (CIS_V8, "11.2"),
        Strong,
        "CIS 11.2 requires automated backups of in-scope assets.",
    ),
    (
        "cm-020",
        (ISO_27001_2022, "A.8.8"),
        (CIS_V8, "7.1"),
        Partial,
        "CIS 7.1 requires a vulnerability management process, a subset of A.8.8.",
    ),
];

/// The curated mappings, in a fixed order.
#[must_use]
pub fn curated_mappings() -> Vec<ControlMapping> {
    ROWS.iter()
        .map(|&(id, source, target, strength, rationale)| ControlMapping {
            id: id.to_string(),
            source_framework_id: source.0.to_string(),
            source_control_id: source.1.to_string(),
            target_framework_id: target.0.to_string(),
            target_control_id: target.1.to_string(),
            strength,
            rationale: rationale.to_string(),
        })
        .collect()
}
