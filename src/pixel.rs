use derive_more::Display;
use std::convert::TryFrom;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pixel {
    #[display(fmt = ".")]
    Empty,
    #[display(fmt = "#")]
    Full,
}

impl TryFrom<char> for Pixel {
    type Error = anyhow::Error;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' | ' ' => Ok(Pixel::Empty),
            '#' => Ok(Pixel::Full),
            _ => anyhow::bail!("Invalid pixel '{}'", c),
        }
    }
}

impl FromStr for Pixel {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().next() {
            None => anyhow::bail!("No pixel character"),
            Some(c) => Pixel::try_from(c),
        }
    }
}

impl Pixel {
    pub fn is_full(&self) -> bool {
        matches!(self, Pixel::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pixels() {
        assert_eq!("#".parse::<Pixel>().unwrap(), Pixel::Full);
        assert_eq!(".".parse::<Pixel>().unwrap(), Pixel::Empty);
        assert_eq!(" ".parse::<Pixel>().unwrap(), Pixel::Empty);
        assert!("O".parse::<Pixel>().is_err());
        assert!("".parse::<Pixel>().is_err());
        assert_eq!(format!("{}{}", Pixel::Full, Pixel::Empty), "#.");
    }
}
