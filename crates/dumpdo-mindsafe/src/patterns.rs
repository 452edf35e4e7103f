//! Canonical risk-pattern table (PT-BR).
//!
//! One detection rule per entry: a case-insensitive regex, the risk type it
//! signals, the severity tier and the base confidence that single pattern
//! contributes. Declaration order matters — it is the tie-break order when
//! several types reach the same severity.
//!
//! Compiled once at first use into an immutable static. `Regex::is_match`
//! keeps no cursor state, so repeated assessments cannot suffer the
//! stateful-matcher false negatives that plague `g`-flagged regexes.

use crate::types::{RiskLevel, RiskType};
use regex::Regex;
use std::sync::OnceLock;

/// Source form of one detection rule.
pub struct PatternSpec {
    pub source: &'static str,
    pub risk_type: RiskType,
    pub severity: RiskLevel,
    pub confidence: f64,
}

const fn spec(
    source: &'static str,
    risk_type: RiskType,
    severity: RiskLevel,
    confidence: f64,
) -> PatternSpec {
    PatternSpec { source, risk_type, severity, confidence }
}

/// Declaration order = evaluation order = aggregator tie-break order.
pub const PATTERN_SPECS: &[PatternSpec] = &[
    // ── Suicidal ideation ───────────────────────────────────────────────
    spec(r"\b(quero|vou|penso em|pensando em)\s+(me\s+)?matar", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.95),
    spec(r"\b(quero|vou|preciso)\s+morrer", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.9),
    spec(r"\b(acabar|terminar)\s+(com\s+)?(tudo|minha vida)", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.85),
    spec(r"\bsuic[ií]d", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.9),
    spec(r"\btirar\s+(a\s+)?(minha\s+)?vida", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.9),
    spec(r"\bn[aã]o\s+(quero|aguento)\s+mais\s+viver", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.9),
    spec(r"\bmelhor\s+(sem\s+mim|se\s+eu\s+morresse|morto)", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.85),
    spec(r"\bfardo\s+p(ara|ra)\s+(todos|todo\s+mundo)", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.8),
    spec(r"\bdesaparecer\s+(de\s+vez|para\s+sempre)", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.8),
    spec(r"\b(pular|me\s+jogar)\s+(do|de)\s+(pr[eé]dio|ponte|altura)", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.9),
    spec(r"\b(tomar|engolir)\s+((todos\s+os\s+)?rem[eé]dios|comprimidos|veneno)", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.85),
    spec(r"\bcortar\s+(os\s+)?(pulsos?|veias?)", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.9),
    spec(r"\bcarta\s+de\s+suic[ií]dio", RiskType::SuicidalIdeation, RiskLevel::Critical, 0.85),

    // ── Self-harm ───────────────────────────────────────────────────────
    spec(r"\b(automutila|me\s+mutilar|auto-?les[aã]o)", RiskType::SelfHarm, RiskLevel::Critical, 0.9),
    spec(r"\bqueimar\s+(a\s+|minha\s+)?pele", RiskType::SelfHarm, RiskLevel::Critical, 0.9),
    spec(r"\b(lamina|gilete|faca)\s+n[oa]\s+(pulso|bra[cç]o|corpo)", RiskType::SelfHarm, RiskLevel::Critical, 0.9),
    spec(r"\bme\s+(cortar|machucar|ferir)", RiskType::SelfHarm, RiskLevel::High, 0.85),
    spec(r"\bfazer\s+cortes", RiskType::SelfHarm, RiskLevel::High, 0.85),
    spec(r"\b(cortes\s+no\s+corpo|marcas\s+no\s+bra[cç]o)", RiskType::SelfHarm, RiskLevel::High, 0.75),
    spec(r"\bbater\s+(em\s+mim|na\s+parede)", RiskType::SelfHarm, RiskLevel::High, 0.75),
    spec(r"\bsentir\s+dor\s+(f[ií]sica\s+)?(me\s+)?(ajuda|acalma)", RiskType::SelfHarm, RiskLevel::High, 0.8),

    // ── Violence ────────────────────────────────────────────────────────
    spec(r"\b(quero|vou)\s+(matar|machucar)\s+(ele|ela|algu[eé]m|todo\s+mundo)", RiskType::Violence, RiskLevel::Critical, 0.95),
    spec(r"\bfazer\s+um\s+massacre", RiskType::Violence, RiskLevel::Critical, 0.95),
    spec(r"\b(arma|rev[oó]lver|faca)\s+p(ra|ara)\s+(matar|acabar\s+com)", RiskType::Violence, RiskLevel::Critical, 0.9),
    spec(r"\bfazer\s+(ele|ela)\s+pagar", RiskType::Violence, RiskLevel::High, 0.75),
    spec(r"\b(vou\s+explodir|vingan[cç]a\s+violenta)", RiskType::Violence, RiskLevel::High, 0.8),

    // ── Substance crisis ────────────────────────────────────────────────
    spec(r"\boverdose", RiskType::SubstanceCrisis, RiskLevel::Critical, 0.9),
    spec(r"\b(vou\s+)?(usar|beber)\s+at[eé]\s+(morrer|apagar|desmaiar)", RiskType::SubstanceCrisis, RiskLevel::Critical, 0.85),
    spec(r"\b(usei|usando|cheirei|injetei)\s+(muita|demais)", RiskType::SubstanceCrisis, RiskLevel::High, 0.8),
    spec(r"\bn[aã]o\s+consigo\s+parar\s+(de\s+)?(usar|beber)", RiskType::SubstanceCrisis, RiskLevel::High, 0.8),
    spec(r"\bmisturar\s+(rem[eé]dios|drogas|[aá]lcool)", RiskType::SubstanceCrisis, RiskLevel::High, 0.8),
    spec(r"\babstin[eê]ncia\s+(pesada|grave|forte)", RiskType::SubstanceCrisis, RiskLevel::High, 0.75),

    // ── Panic attack ────────────────────────────────────────────────────
    spec(r"\bataque\s+de\s+p[aâ]nico", RiskType::PanicAttack, RiskLevel::High, 0.85),
    spec(r"\bcrise\s+de\s+ansiedade", RiskType::PanicAttack, RiskLevel::High, 0.85),
    spec(r"\bn[aã]o\s+consigo\s+respirar", RiskType::PanicAttack, RiskLevel::High, 0.8),
    spec(r"\bfalta\s+de\s+ar", RiskType::PanicAttack, RiskLevel::High, 0.75),
    spec(r"\bvou\s+(enfartar|ter\s+um\s+infarto|morrer\s+agora)", RiskType::PanicAttack, RiskLevel::High, 0.8),
    spec(r"\bcora[cç][aã]o\s+(disparado|acelerado|saindo)", RiskType::PanicAttack, RiskLevel::High, 0.75),
    spec(r"\btudo\s+girando", RiskType::PanicAttack, RiskLevel::High, 0.7),
    spec(r"\b(peito\s+apertado|suando\s+frio)", RiskType::PanicAttack, RiskLevel::Medium, 0.7),
    spec(r"\btremendo\s+(muito|inteiro|sem\s+parar)", RiskType::PanicAttack, RiskLevel::Medium, 0.7),

    // ── Severe distress ─────────────────────────────────────────────────
    spec(r"\bn[aã]o\s+aguento\s+mais", RiskType::SevereDistress, RiskLevel::High, 0.7),
    spec(r"\bcheguei\s+(no|ao)\s+(meu\s+)?limite", RiskType::SevereDistress, RiskLevel::High, 0.7),
    spec(r"\bestou\s+(desesperad[oa]|no\s+fundo\s+do\s+po[cç]o)", RiskType::SevereDistress, RiskLevel::High, 0.75),
    spec(r"\bpreciso\s+(de\s+)?ajuda\s+(urgente|agora)", RiskType::SevereDistress, RiskLevel::High, 0.75),
    spec(r"\bn[aã]o\s+vejo\s+sa[ií]da", RiskType::SevereDistress, RiskLevel::High, 0.8),
    spec(r"\btudo\s+(est[aá]|parece)\s+(perdido|sem\s+sentido)", RiskType::SevereDistress, RiskLevel::High, 0.7),
    spec(r"\b(vou\s+enlouquecer|perdendo\s+o\s+controle|surtando)", RiskType::SevereDistress, RiskLevel::High, 0.75),
    spec(r"\bn[aã]o\s+sei\s+(mais\s+)?o\s+que\s+fazer", RiskType::SevereDistress, RiskLevel::Medium, 0.5),
    spec(r"\b(muito|extremamente)\s+(ansios|triste|angustiad|deprimid)", RiskType::SevereDistress, RiskLevel::Medium, 0.6),
    spec(r"\bn[aã]o\s+(durmo|como|saio)\s+(h[aá]|faz)\s+(dias|semanas)", RiskType::SevereDistress, RiskLevel::Medium, 0.6),
    spec(r"\b(pensamentos|ideias)\s+(ruins|negativ|sombri)", RiskType::SevereDistress, RiskLevel::Medium, 0.55),
    spec(r"\bn[aã]o\s+consigo\s+funcionar", RiskType::SevereDistress, RiskLevel::Medium, 0.6),
    spec(r"\b(chorando|chorei)\s+(o\s+dia\s+todo|sem\s+parar)", RiskType::SevereDistress, RiskLevel::Medium, 0.6),
    spec(r"\bme\s+isol(ei|ando)", RiskType::SevereDistress, RiskLevel::Medium, 0.5),
    spec(r"\b(estou|to|me\s+sinto)\s+(estressad|cansad|esgotad|sobrecarregad)", RiskType::SevereDistress, RiskLevel::Low, 0.4),
    spec(r"\bdia\s+(dif[ií]cil|pesado|ruim)", RiskType::SevereDistress, RiskLevel::Low, 0.4),
    spec(r"\bn[aã]o\s+estou\s+bem", RiskType::SevereDistress, RiskLevel::Low, 0.45),
    spec(r"\bpreciso\s+desabafar", RiskType::SevereDistress, RiskLevel::Low, 0.4),
    spec(r"\bmuita\s+(press[aã]o|cobran[cç]a)", RiskType::SevereDistress, RiskLevel::Low, 0.4),
];

/// A compiled detection rule.
pub struct RiskPattern {
    pub regex: Regex,
    pub spec: &'static PatternSpec,
}

/// Compiled pattern table. Built once, read-only, shared by every
/// concurrent assessment.
pub fn risk_patterns() -> &'static Vec<RiskPattern> {
    static PATTERNS: OnceLock<Vec<RiskPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        PATTERN_SPECS
            .iter()
            .map(|s| RiskPattern {
                regex: Regex::new(&format!("(?i){}", s.source)).expect("invalid risk pattern"),
                spec: s,
            })
            .collect()
    })
}
