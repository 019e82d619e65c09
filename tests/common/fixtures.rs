//! Shared corpus fixtures.

use std::sync::Arc;

use lexbeam::{Bm25Params, CorpusRecord, Domain, IdentifierGrammar, RegulationIndex};

/// A small HIPAA-style corpus in keyed JSON form.
pub const HIPAA_CORPUS_JSON: &str = r#"{
    "164.502": {
        "regulation_content": "164.502 Uses and disclosures of protected health information: General rules.\n(a) Standard. A covered entity or business associate may not use or disclose protected health information, except as permitted or required by this subpart.\n(1) Covered entities: Permitted uses and disclosures.\n(i) To the individual;\n(ii) For treatment, payment, or health care operations.",
        "text": "A covered entity may not use or disclose protected health information except as permitted."
    },
    "164.506": {
        "regulation_content": "164.506 Uses and disclosures to carry out treatment, payment, or health care operations.\n(a) Standard: Permitted uses and disclosures.\n(b) Standard: Consent for uses and disclosures permitted."
    },
    "164.508": {
        "regulation_content": "164.508 Uses and disclosures for which an authorization is required.\n(a) Standard: Authorizations for uses and disclosures.\n(3) Authorization required: Marketing."
    }
}"#;

pub fn hipaa_grammar() -> IdentifierGrammar {
    IdentifierGrammar::preset(Domain::Hipaa).expect("hipaa preset compiles")
}

pub fn hipaa_index() -> Arc<RegulationIndex> {
    Arc::new(
        RegulationIndex::from_json(HIPAA_CORPUS_JSON, hipaa_grammar(), Bm25Params::default())
            .expect("fixture corpus parses"),
    )
}

pub fn gdpr_records() -> Vec<CorpusRecord> {
    vec![
        CorpusRecord::new(
            "article 6",
            "Article 6 Lawfulness of processing\nArticle 6(1) Processing shall be lawful only if the data subject has given consent.",
        ),
        CorpusRecord::new(
            "recital 47",
            "Recital 47 The legitimate interests of a controller may provide a legal basis for processing.",
        ),
    ]
}
