//! Template-based document generator adapter.
//!
//! Renders a session snapshot into a plain-text SRS loosely following
//! IEEE 830. This is the primary implementation of the DocumentGenerator
//! port.

use crate::domain::elicitation::{resolution_label, SessionSnapshot};
use crate::domain::foundation::Timestamp;
use crate::ports::{DocumentError, DocumentGenerator};

const RULE: &str =
    "================================================================================";

/// Requirements longer than this are clipped on their summary line.
pub const SUMMARY_MAX_CHARS: usize = 80;

/// Characters kept before the ellipsis on a clipped summary line.
pub const SUMMARY_KEEP_CHARS: usize = 77;

/// How many requirements the overview lists as product functions.
const PRODUCT_FUNCTIONS_SHOWN: usize = 5;

/// Fixed-template implementation of DocumentGenerator.
#[derive(Debug, Clone, Default)]
pub struct TemplateDocumentGenerator;

impl TemplateDocumentGenerator {
    pub fn new() -> Self {
        Self
    }

    fn banner(title: &str) -> String {
        format!("{}\n{}\n{}\n", RULE, title, RULE)
    }

    fn title_block(&self, project: &str, generated_at: &Timestamp) -> String {
        let mut section = format!("{}\n", RULE);
        for line in [
            "SOFTWARE REQUIREMENTS SPECIFICATION".to_string(),
            "FOR".to_string(),
            project.to_uppercase(),
            "Version 1.0".to_string(),
        ] {
            section.push_str(format!("{:^80}", line).trim_end());
            section.push('\n');
        }
        section.push_str(RULE);
        section.push_str("\n\n");

        section.push_str("Prepared by: AI Requirements Engineering Assistant\n");
        section.push_str(&format!("Date: {}\n", generated_at.iso_date()));
        section.push_str("Status: Draft\n\n");

        section.push_str(&Self::banner("TABLE OF CONTENTS"));
        section.push_str(
            "\n1. Introduction\n\
             2. Overall Description\n\
             3. Specific Requirements\n\
             4. Analysis & Issues\n\
             5. Appendices\n\n",
        );
        section
    }

    fn introduction(&self, project: &str) -> String {
        let mut section = Self::banner("1. INTRODUCTION");
        section.push_str(&format!(
            "\n1.1 Purpose\n\
             This Software Requirements Specification (SRS) specifies the requirements for\n\
             {}. This document was generated using the AI Requirements Gathering\n\
             Assistant and contains functional requirements, non-functional requirements, and\n\
             identified constraints.\n\n",
            project
        ));
        section.push_str(
            "1.2 Document Conventions\n\
             - REQ-[NUMBER]: Functional requirement identifier\n\
             - REQ-NFR-[NUMBER]: Non-functional requirement identifier\n\
             - [ASSUMPTION]: Indicates an assumption\n\
             - [CONSTRAINT]: Indicates a constraint\n\n\
             1.3 Intended Audience\n\
             - Project Managers\n\
             - Business Analysts\n\
             - Software Developers\n\
             - Quality Assurance Engineers\n\
             - Product Owners\n\n",
        );
        section.push_str(&format!(
            "1.4 Product Scope\n\
             {} is designed to meet the requirements captured during the\n\
             automated requirements gathering session.\n\n",
            project
        ));
        section
    }

    fn overall_description(&self, project: &str, requirements: &[String]) -> String {
        let mut section = Self::banner("2. OVERALL DESCRIPTION");
        section.push_str(&format!(
            "\n2.1 Product Perspective\n\
             {} is a new software product designed to address the business needs\n\
             identified during requirements elicitation.\n\n",
            project
        ));

        section.push_str(
            "2.2 Product Functions\n\
             The system shall perform the following major functions:\n",
        );
        for requirement in requirements.iter().take(PRODUCT_FUNCTIONS_SHOWN) {
            section.push_str(&format!("  - {}\n", requirement));
        }
        if requirements.len() > PRODUCT_FUNCTIONS_SHOWN {
            section.push_str(&format!(
                "  - [{} additional requirements captured below]\n",
                requirements.len() - PRODUCT_FUNCTIONS_SHOWN
            ));
        }
        section.push('\n');

        section.push_str(
            "2.3 User Characteristics\n\
             Users of this system include:\n  \
               - End Users\n  \
               - System Administrators\n  \
               - Technical Support Staff\n  \
               - Business Stakeholders\n\n\
             2.4 Operating Environment\n  \
               - Hardware: Standard computing devices (PC, Mac, or Linux)\n  \
               - Software: Modern web browsers or native applications\n  \
               - Network: Stable internet connection recommended\n\n\
             2.5 Constraints\n  \
               - Project Scope: As defined by captured requirements\n  \
               - Timeline: To be determined based on feasibility analysis\n  \
               - Budget: To be determined by project stakeholders\n  \
               - Technology Stack: Open-source components preferred\n\n",
        );
        section
    }

    fn specific_requirements(&self, requirements: &[String]) -> String {
        let mut section = Self::banner("3. SPECIFIC REQUIREMENTS");
        section.push_str("\n3.1 FUNCTIONAL REQUIREMENTS\n");

        for (index, requirement) in requirements.iter().enumerate() {
            section.push_str(&format!(
                "\nREQ-{:03}: {}\n  Priority: Medium\n  Status: Captured\n  Description: {}\n",
                index + 1,
                summary_line(requirement),
                requirement
            ));
        }

        section.push_str(
            "\n3.2 NON-FUNCTIONAL REQUIREMENTS\n\n\
             REQ-NFR-001: Performance\n  \
               The system shall respond to user interactions within 2 seconds.\n\n\
             REQ-NFR-002: Security\n  \
               All data transmission shall be encrypted using HTTPS/TLS 1.2 or higher.\n\n\
             REQ-NFR-003: Availability\n  \
               The system shall maintain 99% uptime during operational hours.\n\n\
             REQ-NFR-004: Scalability\n  \
               The system shall support concurrent users as specified during feasibility analysis.\n\n\
             REQ-NFR-005: Usability\n  \
               The system shall achieve a System Usability Scale (SUS) score of >80.\n\n",
        );
        section
    }

    fn analysis(&self, snapshot: &SessionSnapshot) -> String {
        let mut section = Self::banner("4. ANALYSIS & ISSUES");

        section.push_str(&format!(
            "\n4.1 AMBIGUITIES DETECTED ({})\n",
            snapshot.ambiguities.len()
        ));
        if snapshot.ambiguities.is_empty() {
            section.push_str("\nNo ambiguities detected in captured requirements.\n");
        }
        for (index, finding) in snapshot.ambiguities.iter().enumerate() {
            section.push_str(&format!(
                "\nAMBIGUITY-{}:\n  Requirement: \"{}\"\n  Ambiguous Terms: {}\n  Status: {}\n  \
                 Recommendation: Clarify with stakeholders using specific metrics or examples.\n",
                index + 1,
                finding.source_text,
                finding.terms_joined(),
                resolution_label(finding.resolved)
            ));
        }

        section.push_str(&format!(
            "\n4.2 CONTRADICTIONS DETECTED ({})\n",
            snapshot.contradictions.len()
        ));
        if snapshot.contradictions.is_empty() {
            section.push_str("\nNo contradictions detected in captured requirements.\n");
        }
        for (index, finding) in snapshot.contradictions.iter().enumerate() {
            section.push_str(&format!(
                "\nCONTRADICTION-{}:\n  Conflicting Elements: \"{}\" vs \"{}\"\n  Status: {}\n  \
                 Recommendation: Prioritize requirements with stakeholders and document decision.\n",
                index + 1,
                finding.term_a,
                finding.term_b,
                resolution_label(finding.resolved)
            ));
        }

        let stats = snapshot.stats();
        section.push_str(&format!(
            "\n4.3 FEASIBILITY ASSESSMENT\n  \
               Total Requirements Captured: {}\n  \
               Ambiguities to Resolve: {}\n  \
               Contradictions to Resolve: {}\n\n  \
               Status: PRELIMINARY DRAFT\n  \
               Recommendation: Requirements must be reviewed and validated by human\n  \
               professionals before proceeding with development.\n\n",
            stats.requirements, stats.unresolved_ambiguities, stats.unresolved_contradictions
        ));
        section
    }

    fn appendices(&self, snapshot: &SessionSnapshot) -> String {
        let mut section = Self::banner("5. APPENDICES");
        section.push_str(
            "\nAPPENDIX A: GLOSSARY\n\
             - SRS: Software Requirements Specification\n\
             - REQ: Requirement\n\
             - NFR: Non-Functional Requirement\n\
             - IEEE 830: IEEE Recommended Practice for Software Requirements Specifications\n\n\
             APPENDIX B: CONVERSATION HISTORY\n",
        );
        for (index, message) in snapshot.messages.iter().enumerate() {
            section.push_str(&format!(
                "\n[{}] {}:\n{}\n",
                index + 1,
                message.sender().tag(),
                message.text()
            ));
        }
        section.push('\n');

        section.push_str("APPENDIX C: DISCLAIMER\n");
        section.push_str(&Self::banner("IMPORTANT DISCLAIMER"));
        section.push_str(
            "\nThis Software Requirements Specification was generated using artificial\n\
             intelligence. While the AI system has been designed to capture and structure\n\
             requirements accurately, the following important points must be noted:\n\n\
             1. HUMAN REVIEW REQUIRED: All requirements in this document MUST be reviewed,\n   \
                validated, and approved by qualified human professionals (Business Analysts,\n   \
                Product Managers, or System Architects) before use in development.\n\n\
             2. AI LIMITATIONS: The AI system may:\n   \
                - Misinterpret user intent or context\n   \
                - Miss implicit or domain-specific requirements\n   \
                - Misclassify requirements by type\n   \
                - Fail to detect all ambiguities or contradictions\n\n\
             3. QUALITY ASSURANCE: This document should be considered a PRELIMINARY DRAFT\n   \
                and a starting point for manual requirements refinement, not a final\n   \
                specification ready for development.\n\n\
             4. ACCURACY: No guarantee of accuracy is provided for ambiguity or\n   \
                contradiction detection.\n\n\
             5. LIABILITY: The authors and developers of this AI system are not liable for\n   \
                any issues, delays, or failures in development projects that use this\n   \
                specification without proper human review and validation.\n\n\
             For questions or clarifications regarding any requirement, please contact the\n\
             project stakeholders and domain experts directly.\n\n",
        );
        section
    }

    fn footer(&self, generated_at: &Timestamp) -> String {
        format!(
            "{}\nGenerated: {}\nSystem: Requirements Gathering Bot v1.0 (IEEE 830-1998 Compliant)\n{}\n",
            RULE,
            generated_at.display_datetime(),
            RULE
        )
    }
}

impl DocumentGenerator for TemplateDocumentGenerator {
    fn generate(
        &self,
        snapshot: &SessionSnapshot,
        generated_at: Timestamp,
    ) -> Result<String, DocumentError> {
        let project = snapshot.project_name.trim();
        if project.is_empty() {
            return Err(DocumentError::missing_data("project_name"));
        }

        let mut document = String::new();
        document.push_str(&self.title_block(project, &generated_at));
        document.push_str(&self.introduction(project));
        document.push_str(&self.overall_description(project, &snapshot.requirements));
        document.push_str(&self.specific_requirements(&snapshot.requirements));
        document.push_str(&self.analysis(snapshot));
        document.push_str(&self.appendices(snapshot));
        document.push_str(&self.footer(&generated_at));

        Ok(document)
    }

    fn file_name(&self, snapshot: &SessionSnapshot, generated_at: Timestamp) -> String {
        srs_file_name(&snapshot.project_name, &generated_at)
    }
}

/// Summary form of a requirement: the full text, or its first 77
/// characters plus `...` when it is longer than 80.
pub fn summary_line(requirement: &str) -> String {
    if requirement.chars().count() > SUMMARY_MAX_CHARS {
        let kept: String = requirement.chars().take(SUMMARY_KEEP_CHARS).collect();
        format!("{}...", kept)
    } else {
        requirement.to_string()
    }
}

/// `SRS_<name with whitespace runs as '_'>_<YYYY-MM-DD>.txt`
pub fn srs_file_name(project_name: &str, generated_at: &Timestamp) -> String {
    let name = project_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("SRS_{}_{}.txt", name, generated_at.iso_date())
}
