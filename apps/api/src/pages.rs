//! Page catalogue: path resolution, navigation and home-page content.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    Assistant,
    SmartAssistant,
    CvAnalyzer,
    AtsOptimizer,
    AtsEvaluator,
    CvBuilder,
    NotFound,
}

impl Page {
    /// Every page reachable through a path, in navigation order.
    pub const ROUTED: [Page; 7] = [
        Page::Home,
        Page::Assistant,
        Page::SmartAssistant,
        Page::CvAnalyzer,
        Page::AtsOptimizer,
        Page::AtsEvaluator,
        Page::CvBuilder,
    ];

    pub fn path(self) -> Option<&'static str> {
        match self {
            Page::Home => Some("/"),
            Page::Assistant => Some("/assistant"),
            Page::SmartAssistant => Some("/smart-assistant"),
            Page::CvAnalyzer => Some("/cv-analyzer"),
            Page::AtsOptimizer => Some("/ats-optimizer"),
            Page::AtsEvaluator => Some("/ats-evaluator"),
            Page::CvBuilder => Some("/cv-builder"),
            Page::NotFound => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Accueil",
            Page::Assistant => "Assistant",
            Page::SmartAssistant => "Coach IA",
            Page::CvAnalyzer => "Analyseur CV",
            Page::AtsOptimizer => "Optimiseur ATS",
            Page::AtsEvaluator => "Évaluateur ATS",
            Page::CvBuilder => "Créateur CV",
            Page::NotFound => "Page introuvable",
        }
    }

    /// Maps a location to its page. Query strings, fragments and a trailing
    /// slash are ignored; anything unknown is `NotFound`.
    pub fn resolve(location: &str) -> Page {
        let path = location
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        Page::ROUTED
            .into_iter()
            .find(|page| page.path() == Some(path))
            .unwrap_or(Page::NotFound)
    }

    /// Pages that hold state and can be mounted as a session.
    pub fn is_interactive(self) -> bool {
        !matches!(self, Page::Home | Page::NotFound)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub page: Page,
    pub path: &'static str,
    pub label: &'static str,
}

pub fn nav_items() -> Vec<NavItem> {
    Page::ROUTED
        .into_iter()
        .filter(|page| page.is_interactive())
        .filter_map(|page| {
            page.path().map(|path| NavItem {
                page,
                path,
                label: page.label(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Coach,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureCard {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
    pub accent: Accent,
}

pub fn feature_cards() -> Vec<FeatureCard> {
    vec![
        FeatureCard {
            title: "Assistant",
            description: "Recherche d'emploi simplifiée avec des requêtes en langage naturel.",
            href: "/assistant",
            accent: Accent::Coach,
        },
        FeatureCard {
            title: "Coach IA Smart",
            description: "Votre coach carrière personnel avec Coach Karim pour des conseils personnalisés.",
            href: "/smart-assistant",
            accent: Accent::User,
        },
        FeatureCard {
            title: "Analyseur CV",
            description: "Comparez votre CV aux offres d'emploi et identifiez les compétences clés.",
            href: "/cv-analyzer",
            accent: Accent::Coach,
        },
        FeatureCard {
            title: "Optimiseur ATS",
            description: "Optimisez votre CV pour passer les systèmes de suivi des candidatures.",
            href: "/ats-optimizer",
            accent: Accent::User,
        },
        FeatureCard {
            title: "Évaluateur ATS",
            description: "Évaluation complète de votre CV avec 14 critères professionnels.",
            href: "/ats-evaluator",
            accent: Accent::Coach,
        },
        FeatureCard {
            title: "Créateur CV",
            description: "Créez un CV professionnel optimisé pour le marché marocain.",
            href: "/cv-builder",
            accent: Accent::User,
        },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeStat {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn home_stats() -> Vec<HomeStat> {
    vec![
        HomeStat {
            value: "10K+",
            label: "Offres analysées",
        },
        HomeStat {
            value: "95%",
            label: "Taux de réussite",
        },
        HomeStat {
            value: "5K+",
            label: "Utilisateurs actifs",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_every_routed_path() {
        for page in Page::ROUTED {
            assert_eq!(Page::resolve(page.path().unwrap()), page);
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(Page::resolve("/pricing"), Page::NotFound);
        assert_eq!(Page::resolve("/cv-builder/extra"), Page::NotFound);
    }

    #[test]
    fn test_ignores_trailing_slash_and_query() {
        assert_eq!(Page::resolve("/cv-analyzer/"), Page::CvAnalyzer);
        assert_eq!(Page::resolve("/assistant?q=dev#top"), Page::Assistant);
        assert_eq!(Page::resolve(""), Page::Home);
    }

    #[test]
    fn test_nav_items_skip_home() {
        let items = nav_items();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].path, "/assistant");
        assert!(items.iter().all(|i| i.page.is_interactive()));
    }

    #[test]
    fn test_feature_cards_link_to_nav_pages() {
        for card in feature_cards() {
            assert!(Page::resolve(card.href).is_interactive(), "{}", card.href);
        }
    }

    #[test]
    fn test_page_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Page::SmartAssistant).unwrap(),
            "\"smart-assistant\""
        );
    }
}
