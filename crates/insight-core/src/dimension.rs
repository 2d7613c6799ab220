use serde::Serialize;

/// One scored category of a self-assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimension {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Areas of the life-balance wheel, in display order.
pub const LIFE_BALANCE: &[Dimension] = &[
    Dimension {
        key: "saude",
        label: "Saúde e Bem-estar",
        description: "Condição física, alimentação, exercícios",
    },
    Dimension {
        key: "relacionamentos",
        label: "Relacionamentos",
        description: "Família, amigos, vida social",
    },
    Dimension {
        key: "carreira",
        label: "Carreira e Trabalho",
        description: "Satisfação profissional, crescimento",
    },
    Dimension {
        key: "financas",
        label: "Finanças",
        description: "Estabilidade financeira, planejamento",
    },
    Dimension {
        key: "desenvolvimento",
        label: "Desenvolvimento Pessoal",
        description: "Aprendizado, crescimento pessoal",
    },
    Dimension {
        key: "lazer",
        label: "Lazer e Diversão",
        description: "Hobbies, entretenimento, diversão",
    },
    Dimension {
        key: "ambiente",
        label: "Ambiente Físico",
        description: "Casa, trabalho, organização",
    },
    Dimension {
        key: "espiritualidade",
        label: "Espiritualidade",
        description: "Propósito, significado, fé",
    },
];

pub fn find<'a>(dimensions: &'a [Dimension], key: &str) -> Option<&'a Dimension> {
    dimensions.iter().find(|d| d.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn life_balance_has_eight_unique_keys() {
        assert_eq!(LIFE_BALANCE.len(), 8);
        let keys: HashSet<&str> = LIFE_BALANCE.iter().map(|d| d.key).collect();
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn life_balance_order() {
        let keys: Vec<&str> = LIFE_BALANCE.iter().map(|d| d.key).collect();
        assert_eq!(
            keys,
            [
                "saude",
                "relacionamentos",
                "carreira",
                "financas",
                "desenvolvimento",
                "lazer",
                "ambiente",
                "espiritualidade",
            ]
        );
    }

    #[test]
    fn find_by_key() {
        assert_eq!(find(LIFE_BALANCE, "lazer").unwrap().label, "Lazer e Diversão");
        assert!(find(LIFE_BALANCE, "sleep").is_none());
    }
}
