//! Reward definitions
//!
//! Two fixed catalogs ship with the site: the hidden rewards carrying promo
//! codes, and the achievement badges. Both are plain data fed into the same
//! [`RewardLedger`](crate::ledger::RewardLedger).

use chrono::{DateTime, Utc};

/// Reward ids referenced by triggers in the shell.
pub mod ids {
    pub const FIRST_CLICK: &str = "FIRST_CLICK";
    pub const GLOBE_EXPLORER: &str = "GLOBE_EXPLORER";
    pub const MENU_MASTER: &str = "MENU_MASTER";
    pub const NIGHT_VISITOR: &str = "NIGHT_VISITOR";
    pub const TERRAIN_ARTIST: &str = "TERRAIN_ARTIST";
    pub const LONG_READER: &str = "LONG_READER";
    pub const SCROLL_MASTER: &str = "SCROLL_MASTER";
    pub const CONTACT_READY: &str = "CONTACT_READY";

    pub const EXPLORER: &str = "EXPLORER";
    pub const CURIOUS: &str = "CURIOUS";
    pub const HACKER: &str = "HACKER";
    pub const NIGHT_OWL: &str = "NIGHT_OWL";
    pub const EARLY_BIRD: &str = "EARLY_BIRD";
    pub const DANGER_ZONE: &str = "DANGER_ZONE";
    pub const MATRIX_MASTER: &str = "MATRIX_MASTER";
    pub const KONAMI_MASTER: &str = "KONAMI_MASTER";
}

/// Catalog entry: immutable display metadata plus the unlock state.
#[derive(Debug, Clone, PartialEq)]
pub struct Reward {
    /// Stable token, unique within a catalog. Also the persistence key.
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// What the visitor gets. Empty for badge-only achievements.
    pub benefit: &'static str,
    /// Promo code shown once discovered. Never validated anywhere.
    pub code: &'static str,
    /// Shown instead of the description while undiscovered.
    pub trigger_hint: &'static str,
    pub discovered: bool,
    pub discovered_at: Option<DateTime<Utc>>,
}

impl Reward {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        icon: &'static str,
        benefit: &'static str,
        code: &'static str,
        trigger_hint: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            description,
            icon,
            benefit,
            code,
            trigger_hint,
            discovered: false,
            discovered_at: None,
        }
    }

    /// Badge with no promo attached; the description doubles as the hint.
    pub const fn badge(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        icon: &'static str,
    ) -> Self {
        Self::new(id, name, description, icon, "", "", description)
    }

    pub fn has_benefit(&self) -> bool {
        !self.benefit.is_empty()
    }
}

static HIDDEN_REWARDS: &[Reward] = &[
    Reward::new(
        ids::FIRST_CLICK,
        "Первое прикосновение",
        "Нажал на центральную сферу",
        "✨",
        "10% скидка на первый проект",
        "FIRST10",
        "Сфера в центре экрана",
    ),
    Reward::new(
        ids::GLOBE_EXPLORER,
        "Исследователь",
        "Повращал глобус на 360°",
        "★",
        "Бесплатная консультация 30 мин",
        "CONSULT30",
        "Глобус в секции присутствия",
    ),
    Reward::new(
        ids::MENU_MASTER,
        "Навигатор",
        "Открыл все пункты меню",
        "⚡",
        "Приоритетная очередь проекта",
        "PRIORITY",
        "Веерное меню снизу",
    ),
    Reward::new(
        ids::NIGHT_VISITOR,
        "Ночной гость",
        "Посетил сайт после полуночи",
        "♛",
        "15% скидка на любой проект",
        "NIGHT15",
        "Посети нас после 00:00",
    ),
    Reward::new(
        ids::TERRAIN_ARTIST,
        "Художник данных",
        "Создал волну на террейне",
        "◆",
        "Бесплатный аудит проекта",
        "AUDIT",
        "Интерактивная сетка данных",
    ),
    Reward::new(
        ids::LONG_READER,
        "Внимательный",
        "Провёл на сайте более 3 минут",
        "🎁",
        "Расширенное коммерческое предложение",
        "EXTENDED",
        "Изучай сайт внимательно",
    ),
    Reward::new(
        ids::SCROLL_MASTER,
        "Путешественник",
        "Прокрутил до конца страницы",
        "%",
        "5% скидка + бонусная правка",
        "SCROLL5",
        "Прокрути до самого низа",
    ),
    Reward::new(
        ids::CONTACT_READY,
        "Готов к диалогу",
        "Навёл на все CTA кнопки",
        "✉",
        "Экспресс-ответ в течение 1 часа",
        "EXPRESS",
        "Исследуй все кнопки действия",
    ),
];

static ACHIEVEMENTS: &[Reward] = &[
    Reward::badge(ids::EXPLORER, "Explorer", "Посетил все секции сайта", "🧭"),
    Reward::badge(ids::CURIOUS, "Curious", "Нашёл секретную команду", "👁"),
    Reward::badge(ids::HACKER, "Hacker", "Попытался взломать систему", "⌨"),
    Reward::badge(ids::NIGHT_OWL, "Night Owl", "Посетил сайт после полуночи", "☾"),
    Reward::badge(ids::EARLY_BIRD, "Early Bird", "Посетил сайт до 6 утра", "☀"),
    Reward::badge(ids::DANGER_ZONE, "Danger Zone", "Попробовал опасную команду", "☠"),
    Reward::badge(ids::MATRIX_MASTER, "Matrix Master", "Вошёл в матрицу", "★"),
    Reward::badge(ids::KONAMI_MASTER, "Konami Master", "Ввёл код Konami", "🏆"),
];

/// Promo rewards hidden around the landing page.
pub fn hidden_rewards() -> Vec<Reward> {
    HIDDEN_REWARDS.to_vec()
}

/// Badge achievements (time-of-day visits, the Konami code, terminal tricks).
pub fn achievements() -> Vec<Reward> {
    ACHIEVEMENTS.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        for catalog in [hidden_rewards(), achievements()] {
            let unique: HashSet<_> = catalog.iter().map(|r| r.id).collect();
            assert_eq!(unique.len(), catalog.len());
        }
    }

    #[test]
    fn catalogs_start_undiscovered() {
        assert!(
            hidden_rewards()
                .iter()
                .chain(achievements().iter())
                .all(|r| !r.discovered && r.discovered_at.is_none())
        );
    }

    #[test]
    fn every_hidden_reward_carries_a_code() {
        assert_eq!(hidden_rewards().len(), 8);
        assert!(hidden_rewards().iter().all(|r| r.has_benefit() && !r.code.is_empty()));
        assert!(achievements().iter().all(|r| !r.has_benefit()));
    }
}
