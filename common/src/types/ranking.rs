use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Criterio de orden para el listado de restaurantes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RankingKey {
    /// Cantidad de pedidos completados, descendente.
    Popularity,
    /// Total facturado, descendente.
    Sales,
    /// Distancia al comensal, ascendente.
    Proximity,
}

impl FromStr for RankingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "popularity" => Ok(RankingKey::Popularity),
            "sales" => Ok(RankingKey::Sales),
            "proximity" | "distance" => Ok(RankingKey::Proximity),
            other => Err(format!(
                "unknown ranking '{}', expected popularity|sales|proximity",
                other
            )),
        }
    }
}

impl fmt::Display for RankingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankingKey::Popularity => write!(f, "popularity"),
            RankingKey::Sales => write!(f, "sales"),
            RankingKey::Proximity => write!(f, "proximity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_keys() {
        assert_eq!("popularity".parse::<RankingKey>(), Ok(RankingKey::Popularity));
        assert_eq!("Sales".parse::<RankingKey>(), Ok(RankingKey::Sales));
        assert_eq!("distance".parse::<RankingKey>(), Ok(RankingKey::Proximity));
        assert!("nearest".parse::<RankingKey>().is_err());
    }
}
