//! Per-language knowledge bases: writer instructions, stop-words for the
//! wateriness score and the market a language defaults to.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::data_models::Language;

/// QA thresholds quoted in every instruction text.
pub const MAX_WATERINESS: f64 = 15.0;
pub const MIN_UNIQUENESS: f64 = 90.0;

const STOPWORDS_EN: &[&str] = &[
    "this",
    "that",
    "also",
    "very",
    "just",
    "then",
    "only",
    "about",
    "which",
    "while",
    "where",
    "when",
    "really",
    "actually",
    "basically",
    "however",
    "moreover",
    "furthermore",
    "overall",
    "hence",
    "thus",
];

const STOPWORDS_RU: &[&str] = &[
    "это",
    "как",
    "также",
    "очень",
    "лишь",
    "когда",
    "где",
    "куда",
    "чтобы",
    "однако",
    "вообще",
    "затем",
    "иначе",
    "просто",
    "именно",
    "кроме",
    "всего",
    "прочего",
    "например",
];

const STOPWORDS_UK: &[&str] = &[
    "це",
    "як",
    "також",
    "тому",
    "лише",
    "дуже",
    "якщо",
    "або",
    "коли",
    "які",
    "який",
    "яка",
    "що",
    "щоб",
    "та",
    "і",
    "але",
    "вже",
    "ну",
    "от",
    "тобто",
    "мабуть",
    "наче",
    "просто",
    "зокрема",
    "взагалі",
];

const INSTRUCTIONS_EN: &str = "\
You are a multilingual SEO writer operating in a Frase-like workflow.
Goal: analyze the brief, run market-specific SERP research, propose an H1–H6 outline,
then write unique, expert, factually correct copy in English with minimal fluff,
using only market-relevant keywords.

Checklist:
[ ] 1) Brief analysis: topic, keywords, language=en, market/country (e.g., US), audience, style/tone.
[ ] 2) SERP research (Google CSE; hl=en, gl=US, cr=countryUS): collect top titles and snippets.
[ ] 3) Outline: propose H1–H6 based on SERP; add one-line purpose per section.
[ ] 4) Drafting: integrate keywords naturally, avoid fluff, ensure uniqueness and factual accuracy.
[ ] 5) Final QA: outline preserved, keywords market-relevant, fluff ≤ 15%, uniqueness ≥ 90%.
Response format: 1) Checklist (✅/❌), 2) Outline, 3) Draft (after approval).
";

const INSTRUCTIONS_RU: &str = "\
Ты — многоязычный SEO-копирайтер, работающий по схеме Frase.
Цель: проанализировать ТЗ, выполнить SERP-анализ по выбранной стране, предложить структуру H1–H6,
после утверждения — написать уникальный, экспертный и правдивый текст на русском, без \"воды\",
используя только релевантные рынку ключи.

Чек-лист:
[ ] 1) Анализ ТЗ: тема, ключи, язык=ru, рынок/страна (напр., RU), аудитория, стиль/тон.
[ ] 2) SERP-анализ (Google CSE; hl=ru, gl=RU, cr=countryRU): собрать топ-заголовки и сниппеты.
[ ] 3) Структура: предложить H1–H6 на основе SERP; дать краткие пояснения к разделам.
[ ] 4) Написание: естественно интегрировать ключи, избегать воды, обеспечить уникальность и факт-чекинг.
[ ] 5) Финальная проверка: структура сохранена, ключи релевантны рынку, вода ≤ 15%, уникальность ≥ 90%.
Формат ответа: 1) Чек-лист (✅/❌), 2) Структура, 3) Текст (после апрува).
";

const INSTRUCTIONS_UK: &str = "\
Ти — багатомовний SEO-копірайтер і контент-стратег, що працює за принципом Frase.
Завдання: аналізувати ТЗ, виконувати SERP-аналіз у вказаній країні, пропонувати структуру H1–H6
і писати унікальний, експертний, правдивий текст українською мовою без “води”, використовуючи лише релевантні ринку ключі.

Алгоритм (чек-ліст):
[ ] 1) Аналіз ТЗ: тема, ключі, мова=uk, ринок/країна (UA), аудиторія, стиль/тон.
[ ] 2) SERP-аналіз (Google CSE, hl=uk, gl=UA, cr=countryUA): зібрати топ-заголовки та описи.
[ ] 3) Структура: запропонувати H1–H6 на основі SERP; коротко пояснити зміст кожного розділу.
[ ] 4) Написання: інтегрувати ключі природно, уникати “води”, забезпечити унікальність і правдивість фактів.
[ ] 5) Фінальна перевірка: структура збережена, ключі релевантні ринку, вода ≤ 15%, унікальність ≥ 90%.
Формат відповіді: 1) Чек-ліст (✅/❌), 2) Пропозиція структури, 3) Текст (після апрува).
";

pub struct LanguageProfile {
    pub language: Language,
    pub code: &'static str,
    pub default_country: &'static str,
    pub instructions: &'static str,
    stopwords: HashSet<&'static str>,
}

impl LanguageProfile {
    fn new(
        language: Language,
        default_country: &'static str,
        instructions: &'static str,
        stopwords: &[&'static str],
    ) -> Self {
        Self {
            language,
            code: language.code(),
            default_country,
            instructions,
            stopwords: stopwords.iter().copied().collect(),
        }
    }

    pub fn stopwords(&self) -> &HashSet<&'static str> {
        &self.stopwords
    }

    pub fn knowledge_base(&self) -> KnowledgeBase {
        let mut stopwords: Vec<&'static str> = self.stopwords.iter().copied().collect();
        stopwords.sort_unstable();
        KnowledgeBase {
            language: self.code,
            default_country: self.default_country,
            instructions: self.instructions,
            stopwords,
            targets: QualityTargets {
                max_wateriness: MAX_WATERINESS,
                min_uniqueness: MIN_UNIQUENESS,
            },
        }
    }
}

static PROFILES: Lazy<HashMap<Language, LanguageProfile>> = Lazy::new(|| {
    HashMap::from([
        (
            Language::En,
            LanguageProfile::new(Language::En, "US", INSTRUCTIONS_EN, STOPWORDS_EN),
        ),
        (
            Language::Ru,
            LanguageProfile::new(Language::Ru, "RU", INSTRUCTIONS_RU, STOPWORDS_RU),
        ),
        (
            Language::Uk,
            LanguageProfile::new(Language::Uk, "UA", INSTRUCTIONS_UK, STOPWORDS_UK),
        ),
    ])
});

pub fn profile(language: Language) -> &'static LanguageProfile {
    // every Language variant is inserted above
    &PROFILES[&language]
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QualityTargets {
    pub max_wateriness: f64,
    pub min_uniqueness: f64,
}

/// The static blob served by `GET /knowledge`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    pub language: &'static str,
    pub default_country: &'static str,
    pub instructions: &'static str,
    pub stopwords: Vec<&'static str>,
    pub targets: QualityTargets,
}
