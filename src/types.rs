// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for anef-checker
//!
//! The portal reports the state of a naturalisation file as an opaque
//! status token. Every token we know about is a member of [`StatusCode`];
//! each member has a stable symbolic key (what the portal sends, modulo
//! case) and a canonical French display string.

use serde::{Serialize, Serializer};
use std::fmt;

/// Known naturalisation process states, plus the `UNKNOWN` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCode {
    Draft,
    VerificationFormelleATraiter,
    VerificationFormelleEnCours,
    VerificationFormelleMiseEnDemeure,
    CssMiseEnDemeureAAffecter,
    CssMiseEnDemeureARediger,
    InstructionAAffecter,
    InstructionRecepisseCompletudeAEnvoyer,
    InstructionRecepisseCompletudeAEnvoyerRetourComplementATraiter,
    InstructionDateEaAFixer,
    EaDemandeReportEa,
    EaEnAttenteEa,
    EaCreaAValider,
    PropDecisionPrefAEffectuer,
    PropDecisionPrefEnAttenteRetourHierarchique,
    PropDecisionPrefPropAEditer,
    PropDecisionPrefEnAttenteRetourSignature,
    ControleAEffectuer,
    ControleEnAttentePec,
    ControlePecAFaire,
    ControleTransmisePourDecret,
    ControleEnAttenteRetourHierarchique,
    ControleDecisionAEditer,
    ControleEnAttenteSignature,
    TransmisAAc,
    AVerifierAvantInsertionDecret,
    PretePourInsertionDecret,
    DecretNaturalisationPublic,
    DecretEnPreparation,
    DecretAQualifier,
    DecretEnValidation,
    CssEnDelaisRecours,
    DecisionNegativeEnDelaisRecours,
    IrrecevabiliteManifeste,
    DecisionNotifiee,
    CssNotifie,
    DemandeEnCoursRapo,
    ControleDemandeNotifiee,
    DecretPublie,
    Unknown,
}

// (code, symbolic key, French display string), in process order.
// The `INNTRUCTION` spelling is what the portal actually emits.
const STATUS_CODES: &[(StatusCode, &str, &str)] = &[
    (StatusCode::Draft, "DRAFT", "draft"),
    (
        StatusCode::VerificationFormelleATraiter,
        "VERIFICATION_FORMELLE_A_TRAITER",
        "Vérification formelle : à traiter",
    ),
    (
        StatusCode::VerificationFormelleEnCours,
        "VERIFICATION_FORMELLE_EN_COURS",
        "Vérification formelle : en cours",
    ),
    (
        StatusCode::VerificationFormelleMiseEnDemeure,
        "VERIFICATION_FORMELLE_MISE_EN_DEMEURE",
        "Vérification formelle : mise en demeure",
    ),
    (
        StatusCode::CssMiseEnDemeureAAffecter,
        "CSS_MISE_EN_DEMEURE_A_AFFECTER",
        "CSS : mise en demeure à affecter",
    ),
    (
        StatusCode::CssMiseEnDemeureARediger,
        "CSS_MISE_EN_DEMEURE_A_REDIGER",
        "CSS : mise en demeure à rédiger",
    ),
    (
        StatusCode::InstructionAAffecter,
        "INSTRUCTION_A_AFFECTER",
        "Instruction : à affecter",
    ),
    (
        StatusCode::InstructionRecepisseCompletudeAEnvoyer,
        "INSTRUCTION_RECEPISSE_COMPLETUDE_A_ENVOYER",
        "Instruction : récépissé de complétude à envoyer",
    ),
    (
        StatusCode::InstructionRecepisseCompletudeAEnvoyerRetourComplementATraiter,
        "INSTRUCTION_RECEPISSE_COMPLETUDE_A_ENVOYER_RETOUR_COMPLEMENT_A_TRAITER",
        "Instruction : récépissé de complétude à envoyer (retour complément à traiter)",
    ),
    (
        StatusCode::InstructionDateEaAFixer,
        "INNTRUCTION_DATE_EA_A_FIXER",
        "Instruction : date d'entretien d'assimilation à fixer",
    ),
    (
        StatusCode::EaDemandeReportEa,
        "EA_DEMANDE_REPORT_EA",
        "Entretien d'assimilation : demande de report de l'entretien d'assimilation",
    ),
    (
        StatusCode::EaEnAttenteEa,
        "EA_EN_ATTENTE_EA",
        "Entretien d'assimilation : en attente de l'entretien d'assimilation",
    ),
    (
        StatusCode::EaCreaAValider,
        "EA_CREA_A_VALIDER",
        "Entretien d'assimilation : compte-rendu de l'entretien d'assimilation à valider",
    ),
    (
        StatusCode::PropDecisionPrefAEffectuer,
        "PROP_DECISION_PREF_A_EFFECTUER",
        "Proposition de décision préfectorale : à effectuer",
    ),
    (
        StatusCode::PropDecisionPrefEnAttenteRetourHierarchique,
        "PROP_DECISION_PREF_EN_ATTENTE_RETOUR_HIERARCHIQUE",
        "Proposition de décision préfectorale : en attente de retour hiérarchique",
    ),
    (
        StatusCode::PropDecisionPrefPropAEditer,
        "PROP_DECISION_PREF_PROP_A_EDITER",
        "Proposition de décision préfectorale : proposition à éditer",
    ),
    (
        StatusCode::PropDecisionPrefEnAttenteRetourSignature,
        "PROP_DECISION_PREF_EN_ATTENTE_RETOUR_SIGNATURE",
        "Proposition de décision préfectorale : en attente de retour de signature",
    ),
    (
        StatusCode::ControleAEffectuer,
        "CONTROLE_A_EFFECTUER",
        "Contrôle : à effectuer",
    ),
    (
        StatusCode::ControleEnAttentePec,
        "CONTROLE_EN_ATTENTE_PEC",
        "Contrôle : en attente de pièce d'état civil",
    ),
    (
        StatusCode::ControlePecAFaire,
        "CONTROLE_PEC_A_FAIRE",
        "Contrôle : pièce d'état civil à faire",
    ),
    (
        StatusCode::ControleTransmisePourDecret,
        "CONTROLE_TRANSMISE_POUR_DECRET",
        "Contrôle : transmise pour décret",
    ),
    (
        StatusCode::ControleEnAttenteRetourHierarchique,
        "CONTROLE_EN_ATTENTE_RETOUR_HIERARCHIQUE",
        "Contrôle : en attente de retour hiérarchique",
    ),
    (
        StatusCode::ControleDecisionAEditer,
        "CONTROLE_DECISION_A_EDITER",
        "Contrôle : décision à éditer",
    ),
    (
        StatusCode::ControleEnAttenteSignature,
        "CONTROLE_EN_ATTENTE_SIGNATURE",
        "Contrôle : en attente de signature",
    ),
    (StatusCode::TransmisAAc, "TRANSMIS_A_AC", "Transmis à AC"),
    (
        StatusCode::AVerifierAvantInsertionDecret,
        "A_VERIFIER_AVANT_INSERTION_DECRET",
        "À vérifier avant l'insertion dans le décret",
    ),
    (
        StatusCode::PretePourInsertionDecret,
        "PRETE_POUR_INSERTION_DECRET",
        "Prêt pour l'insertion dans le décret",
    ),
    (
        StatusCode::DecretNaturalisationPublic,
        "DECRET_NATURALISATION_PUBLIC",
        "Décret de naturalisation publié",
    ),
    (
        StatusCode::DecretEnPreparation,
        "DECRET_EN_PREPARATION",
        "Décret en préparation",
    ),
    (
        StatusCode::DecretAQualifier,
        "DECRET_A_QUALIFIER",
        "Décret à qualifier",
    ),
    (
        StatusCode::DecretEnValidation,
        "DECRET_EN_VALIDATION",
        "Décret en validation",
    ),
    (
        StatusCode::CssEnDelaisRecours,
        "CSS_EN_DELAIS_RECOURS",
        "CSS en délais de recours",
    ),
    (
        StatusCode::DecisionNegativeEnDelaisRecours,
        "DECISION_NEGATIVE_EN_DELAIS_RECOURS",
        "Décision négative en délais de recours",
    ),
    (
        StatusCode::IrrecevabiliteManifeste,
        "IRRECEVABILITE_MANIFESTE",
        "Irrecevabilité manifeste",
    ),
    (
        StatusCode::DecisionNotifiee,
        "DECISION_NOTIFIEE",
        "Décision notifiée",
    ),
    (StatusCode::CssNotifie, "CSS_NOTIFIE", "CSS notifié"),
    (
        StatusCode::DemandeEnCoursRapo,
        "DEMANDE_EN_COURS_RAPO",
        "Demande en cours RAPO",
    ),
    (
        StatusCode::ControleDemandeNotifiee,
        "CONTROLE_DEMANDE_NOTIFIEE",
        "Contrôle : demande notifiée",
    ),
    (StatusCode::DecretPublie, "DECRET_PUBLIE", "Décret publié"),
    (StatusCode::Unknown, "UNKNOWN", "Unknown"),
];

impl StatusCode {
    /// Resolve a raw token against the symbolic keys.
    ///
    /// Surrounding whitespace is ignored and the comparison is
    /// case-insensitive, so `"draft"`, `"Draft"` and `" DRAFT "` all resolve
    /// to [`StatusCode::Draft`]. Display strings are not accepted.
    pub fn from_key(token: &str) -> Option<Self> {
        let normalized = token.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return None;
        }
        STATUS_CODES
            .iter()
            .find(|(_, key, _)| *key == normalized)
            .map(|(code, _, _)| *code)
    }

    /// Stable symbolic key, e.g. `"DRAFT"`.
    pub fn key(&self) -> &'static str {
        self.row().1
    }

    /// Canonical display string in French.
    pub fn display(&self) -> &'static str {
        self.row().2
    }

    /// Every status code, in process order. `Unknown` comes last.
    pub fn all() -> impl Iterator<Item = StatusCode> {
        STATUS_CODES.iter().map(|(code, _, _)| *code)
    }

    fn row(&self) -> &'static (StatusCode, &'static str, &'static str) {
        STATUS_CODES
            .iter()
            .find(|(code, _, _)| code == self)
            .unwrap_or(&STATUS_CODES[STATUS_CODES.len() - 1])
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Stages of the naturalisation request process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CreationDemande,
    ExamenPieces,
    DepotDemande,
    TraitementEnCours,
    ReceptionRecepisse,
    EntretienAssimilation,
    DecisionStatuee,
    CeremonieLivret,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::CreationDemande,
            Stage::ExamenPieces,
            Stage::DepotDemande,
            Stage::TraitementEnCours,
            Stage::ReceptionRecepisse,
            Stage::EntretienAssimilation,
            Stage::DecisionStatuee,
            Stage::CeremonieLivret,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Stage::CreationDemande => "CREATION_DEMANDE",
            Stage::ExamenPieces => "EXAMEN_PIECES",
            Stage::DepotDemande => "DEPOT_DEMANDE",
            Stage::TraitementEnCours => "TRAITEMENT_EN_COURS",
            Stage::ReceptionRecepisse => "RECEPTION_RECEPISSE",
            Stage::EntretienAssimilation => "ENTRETIEN_ASSIMILATION",
            Stage::DecisionStatuee => "DECISION_STATUEE",
            Stage::CeremonieLivret => "CEREMONIE_LIVRET",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Stage::CreationDemande => "Création de la demande",
            Stage::ExamenPieces => "Examen des pièces en cours",
            Stage::DepotDemande => "Dépôt de la demande",
            Stage::TraitementEnCours => "Traitement en cours",
            Stage::ReceptionRecepisse => "Réception du récépissé de complétude",
            Stage::EntretienAssimilation => "Entretien d'assimilation",
            Stage::DecisionStatuee => "Décision statuée",
            Stage::CeremonieLivret => "Cérémonie de remise du livret",
        }
    }

    /// Accepts either the symbolic key (any case) or the exact display string.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let upper = trimmed.to_ascii_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|stage| stage.key() == upper || stage.display() == trimmed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

impl Serialize for Stage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Administrations handling the file at a given point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Service {
    Prefecture,
    Anef,
    Sdanf,
    Scec,
    Decret,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Prefecture => "PREFECTURE",
            Service::Anef => "ANEF",
            Service::Sdanf => "SDANF",
            Service::Scec => "SCEC",
            Service::Decret => "DECRET",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PREFECTURE" => Some(Service::Prefecture),
            "ANEF" => Some(Service::Anef),
            "SDANF" => Some(Service::Sdanf),
            "SCEC" => Some(Service::Scec),
            "DECRET" => Some(Service::Decret),
            _ => None,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn from_key_is_case_insensitive() {
        assert_eq!(StatusCode::from_key("draft"), Some(StatusCode::Draft));
        assert_eq!(StatusCode::from_key(" Draft "), Some(StatusCode::Draft));
        assert_eq!(
            StatusCode::from_key("decret_publie"),
            Some(StatusCode::DecretPublie)
        );
    }

    #[test]
    fn from_key_rejects_display_strings_and_garbage() {
        assert_eq!(StatusCode::from_key("Décret publié"), None);
        assert_eq!(StatusCode::from_key("not_a_real_code"), None);
        assert_eq!(StatusCode::from_key(""), None);
        assert_eq!(StatusCode::from_key("   "), None);
    }

    #[test]
    fn every_code_round_trips_through_its_key() {
        let mut keys = HashSet::new();
        for code in StatusCode::all() {
            assert!(keys.insert(code.key()), "duplicate key {}", code.key());
            assert_eq!(StatusCode::from_key(code.key()), Some(code));
            assert!(!code.display().is_empty());
        }
        assert_eq!(keys.len(), 40);
    }

    #[test]
    fn unknown_is_a_member() {
        assert_eq!(StatusCode::from_key("unknown"), Some(StatusCode::Unknown));
        assert_eq!(StatusCode::Unknown.display(), "Unknown");
    }

    #[test]
    fn stage_parses_key_or_display() {
        assert_eq!(Stage::parse("depot_demande"), Some(Stage::DepotDemande));
        assert_eq!(
            Stage::parse("Entretien d'assimilation"),
            Some(Stage::EntretienAssimilation)
        );
        assert_eq!(Stage::parse("entretien d'assimilation"), None);
    }

    #[test]
    fn service_parse() {
        assert_eq!(Service::parse("sdanf"), Some(Service::Sdanf));
        assert_eq!(Service::parse("mairie"), None);
    }

    #[test]
    fn status_code_serializes_as_key() {
        let json = serde_json::to_string(&StatusCode::EaEnAttenteEa).unwrap();
        assert_eq!(json, "\"EA_EN_ATTENTE_EA\"");
    }
}
