//! Canned data returned by the mock services.

use crate::analysis::analyzer::AnalysisResult;
use crate::analysis::evaluator::EvaluationCategory;
use crate::jobs::JobPosting;
use crate::score::Score;

pub const ANALYSIS_MATCH_SCORE: i64 = 78;

pub const ANALYSIS_COMMON_SKILLS: &[&str] =
    &["Python", "SQL", "Data Analysis", "Machine Learning", "Git"];

pub const ANALYSIS_MISSING_SKILLS: &[&str] = &["Kubernetes", "AWS", "Scala"];

pub const ANALYSIS_RECOMMENDATIONS: &[&str] = &[
    "Ajoutez des certifications cloud (AWS/Azure) pour améliorer votre profil",
    "Mentionnez des projets concrets avec des métriques de résultats",
    "Incluez votre niveau de français et d'anglais",
];

/// What the optimizer promises to apply to a CV.
pub const OPTIMIZATION_IMPROVEMENTS: &[&str] = &[
    "Mots-clés optimisés pour les systèmes ATS",
    "Format LaTeX professionnel",
    "Structure adaptée au marché marocain",
    "Mise en page compatible avec tous les ATS",
    "Sections optimisées pour le parsing automatique",
];

/// (name, score, feedback) for the 14 evaluation criteria.
pub const EVALUATION_CATEGORIES: &[(&str, i64, &str)] = &[
    ("Contact et Coordonnées", 95, "Excellent! Toutes les informations essentielles sont présentes."),
    ("Résumé Professionnel", 75, "Bon résumé, mais pourrait être plus impactant avec des métriques."),
    ("Expérience Professionnelle", 85, "Bien structuré avec des résultats quantifiables."),
    ("Formation", 90, "Formation bien présentée et pertinente."),
    ("Compétences Techniques", 70, "Ajoutez plus de mots-clés spécifiques au domaine."),
    ("Compétences Linguistiques", 80, "Niveaux clairement indiqués."),
    ("Certifications", 60, "Envisagez d'ajouter des certifications reconnues."),
    ("Projets", 65, "Décrivez l'impact de vos projets avec des chiffres."),
    ("Mise en Page", 85, "Format clair et professionnel."),
    ("Longueur", 90, "Longueur appropriée pour votre niveau d'expérience."),
    ("Mots-clés ATS", 72, "Augmentez la densité des mots-clés pertinents."),
    ("Action Verbs", 78, "Bonne utilisation des verbes d'action."),
    ("Cohérence", 88, "Style cohérent tout au long du document."),
    ("Lisibilité", 82, "Bonne lisibilité, police et espacement appropriés."),
];

pub const EVALUATION_SUMMARY: &str = "Votre CV montre un bon niveau de professionnalisme. \
Pour améliorer votre score, concentrez-vous sur l'ajout de certifications et l'optimisation des mots-clés ATS.";

pub const COACH_WELCOME: &str = "Bienvenue! Je suis Coach Karim, votre conseiller carrière intelligent. 🎯\n\n\
Je suis spécialisé dans le marché de l'emploi marocain et je peux vous aider avec:\n\n\
• Conseils personnalisés pour votre parcours\n\
• Recherche d'offres adaptées à votre profil\n\
• Préparation aux entretiens\n\
• Stratégies de négociation salariale\n\n\
Comment puis-je vous aider aujourd'hui?";

pub const COACH_REPLIES: &[&str] = &[
    "Excellente question! Pour le marché marocain, je vous recommande de mettre en avant vos compétences techniques et votre capacité d'adaptation. Les entreprises casablancaises recherchent particulièrement des profils polyvalents.",
    "D'après mon analyse du marché actuel, les secteurs IT, fintech et e-commerce sont en forte croissance au Maroc. Votre profil serait très adapté pour ces opportunités.",
    "Je comprends votre situation. Pour maximiser vos chances, je vous suggère de:\n\n1. Personnaliser votre CV pour chaque candidature\n2. Utiliser notre outil d'optimisation ATS\n3. Développer votre réseau sur LinkedIn Maroc\n\nVoulez-vous que je vous aide avec l'un de ces points?",
    "Le salaire moyen pour ce type de poste à Casablanca se situe entre 12,000 et 18,000 MAD selon l'expérience. Je vous conseille de négocier en mettant en avant vos certifications et projets concrets.",
];

pub const SEARCH_SUGGESTIONS: &[&str] = &[
    "Développeur web à Casablanca",
    "Stage marketing digital Rabat",
    "Data scientist junior",
    "Chef de projet IT",
];

pub fn analysis_result() -> AnalysisResult {
    AnalysisResult {
        match_score: Score::new(ANALYSIS_MATCH_SCORE),
        common_skills: to_strings(ANALYSIS_COMMON_SKILLS),
        missing_skills: to_strings(ANALYSIS_MISSING_SKILLS),
        recommendations: to_strings(ANALYSIS_RECOMMENDATIONS),
    }
}

pub fn evaluation_categories() -> Vec<EvaluationCategory> {
    EVALUATION_CATEGORIES
        .iter()
        .map(|(name, score, feedback)| EvaluationCategory {
            name: name.to_string(),
            score: Score::new(*score),
            feedback: feedback.to_string(),
        })
        .collect()
}

pub fn sample_jobs() -> Vec<JobPosting> {
    vec![
        job(1, "Développeur Full Stack", "Tech Morocco", "Casablanca", "Il y a 2 jours", 92, "LinkedIn"),
        job(2, "Data Analyst", "Finance Plus", "Rabat", "Il y a 3 jours", 85, "ReKrute"),
        job(3, "Chef de Projet Digital", "Digital Agency MA", "Marrakech", "Il y a 1 jour", 78, "Indeed"),
        job(4, "Ingénieur DevOps", "Cloud Solutions", "Casablanca", "Aujourd'hui", 88, "Stagiaires.ma"),
    ]
}

fn job(
    id: u32,
    title: &str,
    company: &str,
    location: &str,
    posted: &str,
    match_score: i64,
    source: &str,
) -> JobPosting {
    JobPosting {
        id,
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        posted: posted.to_string(),
        match_score: Score::new(match_score),
        source: source.to_string(),
        url: None,
    }
}

pub fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourteen_evaluation_categories() {
        assert_eq!(evaluation_categories().len(), 14);
    }

    #[test]
    fn test_category_mean_rounds_to_eighty() {
        let mean = Score::mean(evaluation_categories().iter().map(|c| c.score)).unwrap();
        assert_eq!(mean.value(), 80);
    }

    #[test]
    fn test_coach_pool_has_four_replies() {
        assert_eq!(COACH_REPLIES.len(), 4);
    }
}
