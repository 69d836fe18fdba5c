//! Choice fields shared by several calculators.

choice_enum! {
    /// Biological sex, for formulas with sex-specific constants
    pub enum Sex {
        Male => "male", "Male";
        Female => "female", "Female";
    }
}

choice_enum! {
    /// US region used to scale national price bands
    pub enum Region {
        National => "national", "National average";
        Northeast => "northeast", "Northeast";
        West => "west", "West";
        Midwest => "midwest", "Midwest";
        South => "south", "South";
    }
}

impl Region {
    /// Regional cost index relative to the national average
    pub fn cost_index(self) -> f64 {
        match self {
            Region::National => 1.0,
            Region::Northeast => 1.15,
            Region::West => 1.10,
            Region::Midwest => 0.95,
            Region::South => 0.90,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_and_labels() {
        assert_eq!(Sex::TAGS, &["male", "female"]);
        assert_eq!(Sex::from_tag("female"), Some(Sex::Female));
        assert_eq!(Sex::from_tag("Female"), None);
        assert_eq!(Region::Midwest.to_string(), "Midwest");
        assert_eq!(Region::ALL.len(), Region::TAGS.len());
    }

    #[test]
    fn test_serde_uses_tags() {
        assert_eq!(serde_json::to_string(&Region::Northeast).unwrap(), "\"northeast\"");
        let sex: Sex = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(sex, Sex::Male);
    }

    #[test]
    fn test_cost_index() {
        for region in Region::ALL {
            assert!(region.cost_index() > 0.0);
        }
        assert_eq!(Region::National.cost_index(), 1.0);
    }
}
