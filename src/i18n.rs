//! Display strings in Portuguese and English
//!
//! Every piece of text the screens draw goes through `text()`, so switching
//! the language in the settings screen takes effect on the next frame.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Pt, Language::En];

    /// Name of the language in that language, for the language buttons
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Pt => "Português",
            Language::En => "English",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    GameTitle,
    StartGame,
    Settings,
    ExitGame,
    Volume,
    Language,
    Credits,
    CreditsText,
    Back,
    GameOver,
    RestartHint,
    Victory,
    VictorySubtitle,
    ContinueHint,
    Loading,
    ProceedToShip,
    SkipHint,
}

impl TextKey {
    #[cfg(test)]
    pub const ALL: [TextKey; 17] = [
        TextKey::GameTitle,
        TextKey::StartGame,
        TextKey::Settings,
        TextKey::ExitGame,
        TextKey::Volume,
        TextKey::Language,
        TextKey::Credits,
        TextKey::CreditsText,
        TextKey::Back,
        TextKey::GameOver,
        TextKey::RestartHint,
        TextKey::Victory,
        TextKey::VictorySubtitle,
        TextKey::ContinueHint,
        TextKey::Loading,
        TextKey::ProceedToShip,
        TextKey::SkipHint,
    ];
}

/// Looks up the display string for `key` in `language`
pub fn text(language: Language, key: TextKey) -> &'static str {
    match language {
        Language::Pt => match key {
            TextKey::GameTitle => "GUERRA INTERGALAXIA",
            TextKey::StartGame => "Iniciar Jogo",
            TextKey::Settings => "Ajustes",
            TextKey::ExitGame => "Sair",
            TextKey::Volume => "Volume:",
            TextKey::Language => "Idioma:",
            TextKey::Credits => "Créditos:",
            TextKey::CreditsText => {
                "Desenvolvido por: Pedro Jorge, Rafael Veloso, Alef Pires e Victor Solano\n\
                 Arte: Yasmin França\n\
                 Música: Dimitri Araujo"
            }
            TextKey::Back => "Voltar",
            TextKey::GameOver => "GAME OVER",
            TextKey::RestartHint => "Pressione R para reiniciar",
            TextKey::Victory => "VITÓRIA!",
            TextKey::VictorySubtitle => "Parabéns! Você derrotou o Boss!",
            TextKey::ContinueHint => "Pressione ENTER para continuar",
            TextKey::Loading => "Carregando...",
            TextKey::ProceedToShip => "Área limpa! Siga para a nave",
            TextKey::SkipHint => "ESPAÇO para pular",
        },
        Language::En => match key {
            TextKey::GameTitle => "INTERGALAXY WAR",
            TextKey::StartGame => "Start Game",
            TextKey::Settings => "Settings",
            TextKey::ExitGame => "Exit",
            TextKey::Volume => "Volume:",
            TextKey::Language => "Language:",
            TextKey::Credits => "Credits:",
            TextKey::CreditsText => {
                "Developed by: Pedro Jorge, Rafael Veloso, Alef Pires and Victor Solano\n\
                 Art: Yasmin França\n\
                 Music: Dimitri Araujo"
            }
            TextKey::Back => "Back",
            TextKey::GameOver => "GAME OVER",
            TextKey::RestartHint => "Press R to restart",
            TextKey::Victory => "VICTORY!",
            TextKey::VictorySubtitle => "Congratulations! You defeated the Boss!",
            TextKey::ContinueHint => "Press ENTER to continue",
            TextKey::Loading => "Loading...",
            TextKey::ProceedToShip => "Area clear! Head to the ship",
            TextKey::SkipHint => "SPACE to skip",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_has_text_in_every_language() {
        for language in Language::ALL {
            for key in TextKey::ALL {
                assert!(!text(language, key).is_empty(), "{language:?} {key:?}");
            }
        }
    }

    #[test]
    fn test_titles() {
        assert_eq!(text(Language::Pt, TextKey::GameTitle), "GUERRA INTERGALAXIA");
        assert_eq!(text(Language::En, TextKey::GameTitle), "INTERGALAXY WAR");
        assert_eq!(text(Language::En, TextKey::Back), "Back");
    }

    #[test]
    fn test_language_label_differs_from_language_type() {
        assert_eq!(text(Language::Pt, TextKey::Language), "Idioma:");
        assert_eq!(text(Language::En, TextKey::Language), "Language:");
    }

    #[test]
    fn test_credits_are_multiline() {
        assert_eq!(text(Language::Pt, TextKey::CreditsText).lines().count(), 3);
    }

    #[test]
    fn test_language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        assert_eq!(serde_json::from_str::<Language>("\"pt\"").unwrap(), Language::Pt);
    }
}
