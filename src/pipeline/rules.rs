use crate::models::FactStatus;

use super::types::ComplianceFact;

/// One declarative keyword-triggered rule: if any trigger keyword appears in
/// the evidence text, the rule's fact is appended to the report. Rules fire
/// independently of each other. This table is the extension point for adding
/// jurisdictions or directives without touching control flow.
pub struct ComplianceRule {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub source: &'static str,
    pub status: FactStatus,
    /// Lowercase keywords matched against the lowercased evidence text.
    pub triggers: &'static [&'static str],
}

impl ComplianceRule {
    pub fn fact(&self) -> ComplianceFact {
        ComplianceFact {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            source: self.source.to_string(),
            status: self.status,
        }
    }

    pub fn matches(&self, haystack: &str) -> bool {
        self.triggers.iter().any(|kw| haystack.contains(kw))
    }
}

/// Facts present in every heuristic report, regardless of evidence.
pub fn seed_facts() -> Vec<ComplianceFact> {
    vec![
        ComplianceFact {
            id: "gpsr-general-safety".into(),
            title: "Vispārējā produktu drošuma regula (GPSR)".into(),
            description: "Saskaņā ar Regulu (ES) 2023/988 (GPSR) visiem tirgū laistajiem \
                          produktiem ir jābūt drošiem. Ražotājiem ir jāveic iekšējā riska analīze."
                .into(),
            source: "EU 2023/988".into(),
            status: FactStatus::Unknown,
        },
        ComplianceFact {
            id: "ce-marking".into(),
            title: "CE marķējums".into(),
            description: "Nepieciešams specifiskām produktu grupām (rotaļlietām, elektronikai, \
                          mašīnām), ko pārdod Eiropas Ekonomikas zonā (EEZ)."
                .into(),
            source: "EU No 765/2008".into(),
            status: FactStatus::Warning,
        },
    ]
}

/// Keyword-triggered directive rules, evaluated once per heuristic analysis.
pub const RULES: &[ComplianceRule] = &[
    ComplianceRule {
        id: "toy-safety",
        title: "Rotaļlietu drošuma direktīva",
        description: "Prasības attiecībā uz fizikālajām un mehāniskajām īpašībām, \
                      uzliesmojamību, ķīmiskajām īpašībām un elektriskajām īpašībām.",
        source: "2009/48/EC",
        status: FactStatus::Warning,
        triggers: &["toy", "child", "lego", "doll"],
    },
    ComplianceRule {
        id: "rohs",
        title: "RoHS direktīva",
        description: "Bīstamu vielu ierobežošana elektriskajās un elektroniskajās iekārtās. \
                      Jāpārliecinās par RoHS deklarācijas esamību.",
        source: "2011/65/EU",
        status: FactStatus::Unknown,
        triggers: &["electronics", "electrical", "plug", "phone", "computer"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_facts_are_two_and_stable() {
        let seeds = seed_facts();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].id, "gpsr-general-safety");
        assert_eq!(seeds[0].status, FactStatus::Unknown);
        assert_eq!(seeds[1].id, "ce-marking");
        assert_eq!(seeds[1].status, FactStatus::Warning);
    }

    #[test]
    fn toy_rule_matches_any_trigger() {
        let toy = &RULES[0];
        assert!(toy.matches("wooden toy for toddlers"));
        assert!(toy.matches("lego set 4032"));
        assert!(!toy.matches("kitchen appliance"));
    }

    #[test]
    fn rules_fire_independently() {
        let haystack = "electronic toy with plug";
        let fired: Vec<&str> = RULES
            .iter()
            .filter(|r| r.matches(haystack))
            .map(|r| r.id)
            .collect();
        assert_eq!(fired, vec!["toy-safety", "rohs"]);
    }

    #[test]
    fn fact_ids_are_unique_across_seeds_and_rules() {
        let mut ids: Vec<String> = seed_facts().into_iter().map(|f| f.id).collect();
        ids.extend(RULES.iter().map(|r| r.id.to_string()));
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
