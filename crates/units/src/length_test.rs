mod tests {
    use approx::assert_relative_eq;

    use crate::length::{Length, AU_TO_KM, AU_TO_M};

    #[test]
    fn test_length_conversions() {
        // Test AU to m conversion
        let length_au = Length::from_au(1.0);
        assert_relative_eq!(length_au.to_m(), AU_TO_M);
        assert_relative_eq!(length_au.to_km(), AU_TO_KM);

        // Test km to AU conversion
        let length_km = Length::from_km(AU_TO_KM);
        assert_relative_eq!(length_km.to_au(), 1.0);

        // Test round trip
        let original = 5.7;
        let length = Length::from_au(original);
        let m_value = length.to_m();
        let round_trip = Length::from_meters(m_value).to_au();
        assert_relative_eq!(round_trip, original);
    }

    #[test]
    fn test_length_arithmetic_operations() {
        let length1 = Length::from_au(5.0);
        let length2 = Length::from_au(3.0);

        assert_relative_eq!((length1 + length2).to_au(), 8.0);
        assert_relative_eq!((length1 - length2).to_au(), 2.0);

        let scaled = length1 * 2.0;
        assert_relative_eq!(scaled.to_au(), 10.0);

        let divided = length1 / 2.0;
        assert_relative_eq!(divided.to_au(), 2.5);

        let commutative = 1.5 * length1;
        assert_relative_eq!(commutative.to_au(), 7.5);
    }

    #[test]
    fn test_length_min_max() {
        let length1 = Length::from_au(5.0);
        let length2 = Length::from_au(3.0);

        assert_relative_eq!(length1.min(length2).to_au(), 3.0);
        assert_relative_eq!(length1.max(length2).to_au(), 5.0);
    }
}
