//! Sample entries inserted into an empty diary at startup.

use chrono::{DateTime, Utc};

use crate::models::diary_entry::{DiaryEntryFilter, NewDiaryEntry};
use crate::repositories::DiaryEntryRepo;
use crate::DbPool;

/// `(title, content, mood, entry_date, is_favorite, tags)`
type SampleEntry = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    bool,
    &'static [&'static str],
);

const SAMPLE_ENTRIES: &[SampleEntry] = &[
    (
        "Meu primeiro dia no novo projeto",
        "Hoje comecei a trabalhar no projeto Entre Páginas. Estou muito animada com as \
         possibilidades que este diário digital pode oferecer.",
        "feliz",
        "2024-12-15T10:30:00Z",
        true,
        &["trabalho", "projetos", "animação"],
    ),
    (
        "Reflexões sobre o fim de semana",
        "O fim de semana foi relaxante. Passei tempo lendo um livro interessante e \
         escrevendo algumas ideias.",
        "tranquilo",
        "2024-12-14T14:15:00Z",
        false,
        &["relaxamento", "leitura", "desenvolvimento-pessoal"],
    ),
    (
        "Pensamentos aleatórios",
        "Às vezes é bom apenas escrever sem pensar muito. Hoje estou contemplativa, \
         observando as nuvens pela janela.",
        "contemplativo",
        "2024-12-13T20:45:00Z",
        true,
        &["reflexão", "escrita", "contemplação"],
    ),
    (
        "Descobertas musicais",
        "Descobri uma playlist incrível hoje! Cada melodia conta uma história, cada \
         ritmo desperta uma emoção diferente.",
        "animado",
        "2024-12-12T16:20:00Z",
        false,
        &["música", "descobertas", "emoções"],
    ),
    (
        "Caminhada matinal",
        "A caminhada matinal de hoje foi especialmente revigorante. Momentos simples \
         como esses são verdadeiros presentes.",
        "grateful",
        "2024-12-11T08:00:00Z",
        true,
        &["natureza", "exercício", "gratidão", "manhã"],
    ),
    (
        "Desafios e aprendizados",
        "Enfrentei alguns desafios técnicos hoje. Depois de algumas horas de pesquisa \
         consegui resolver tudo. Cada obstáculo é uma oportunidade de crescimento.",
        "reflexivo",
        "2024-12-10T19:30:00Z",
        false,
        &["desafios", "aprendizado", "crescimento", "tecnologia"],
    ),
    (
        "Noite de leitura",
        "Passei a noite lendo um romance que me cativou desde a primeira página. A \
         literatura é realmente uma forma de magia.",
        "contemplativo",
        "2024-12-09T22:15:00Z",
        true,
        &["leitura", "literatura", "noite", "imaginação"],
    ),
    (
        "Cozinhando com amor",
        "Preparei uma receita nova hoje e o resultado foi surpreendente! O aroma que \
         tomou conta da cozinha me trouxe memórias da infância.",
        "feliz",
        "2024-12-08T18:45:00Z",
        false,
        &["culinária", "criatividade", "memórias", "família"],
    ),
];

/// The sample entries as insertable rows.
pub fn sample_entries() -> Vec<NewDiaryEntry> {
    SAMPLE_ENTRIES
        .iter()
        .map(|&(title, content, mood, entry_date, is_favorite, tags)| NewDiaryEntry {
            title: title.to_string(),
            content: content.to_string(),
            mood: Some(mood.to_string()),
            entry_date: DateTime::parse_from_rfc3339(entry_date)
                .map(|ts| ts.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            is_favorite,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

/// Insert the sample entries if the diary is empty.
///
/// Returns the number of entries inserted (0 when the diary already had
/// data).
pub async fn seed_sample_entries(pool: &DbPool) -> Result<usize, sqlx::Error> {
    let existing = DiaryEntryRepo::count(pool, &DiaryEntryFilter::default()).await?;
    if existing > 0 {
        tracing::debug!(existing, "Diary not empty, skipping sample entries");
        return Ok(0);
    }

    let entries = sample_entries();
    for entry in &entries {
        DiaryEntryRepo::create(pool, entry).await?;
    }

    tracing::info!(count = entries.len(), "Inserted sample diary entries");
    Ok(entries.len())
}
