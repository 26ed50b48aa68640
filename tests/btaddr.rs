#[cfg(test)]
mod tests {
    use btcapi::BtAddress;

    #[test]
    fn from_string_invalid() {
        assert!(BtAddress::from_string("").is_none());
        assert!(BtAddress::from_string("some invalid string").is_none());
        assert!(BtAddress::from_string("aa:bb:cc:dd:ee:ff:00").is_none());
        assert!(BtAddress::from_string("aa:bb:cc:dd:ee").is_none());
        assert!(BtAddress::from_string("aa:bb:cc:dd::ff").is_none());
        assert!(BtAddress::from_string("aa:bb:cc:dd:e:ff").is_none());
        assert!(BtAddress::from_string("aa:bb:cc:dd:ee:fg").is_none());
    }

    #[test]
    fn from_string_valid() {
        let addr = BtAddress::from_string("11:22:33:aa:bb:cc");
        assert!(addr.is_some());
        assert_eq!([0x11, 0x22, 0x33, 0xaa, 0xbb, 0xcc], addr.unwrap().to_byte_arr());

        // Upper/lower case should not matter.
        let addr = BtAddress::from_string("11:22:33:AA:BB:CC");
        assert!(addr.is_some());
        assert_eq!([0x11, 0x22, 0x33, 0xaa, 0xbb, 0xcc], addr.unwrap().to_byte_arr());
    }

    #[test]
    fn from_bytes_invalid() {
        assert!(BtAddress::from_bytes(&[]).is_none());
        assert!(BtAddress::from_bytes(&[1, 2, 3, 4, 5]).is_none());
        assert!(BtAddress::from_bytes(&[1, 2, 3, 4, 5, 6, 7]).is_none());
    }

    #[test]
    fn from_bytes_valid() {
        let addr = BtAddress::from_bytes(&[1, 2, 3, 4, 5, 6]);
        assert!(addr.is_some());
        assert_eq!([1, 2, 3, 4, 5, 6], addr.unwrap().to_byte_arr());
    }

    #[test]
    fn round_trip_bytes_string_bytes() {
        let raw = [0x00, 0x1b, 0x66, 0xfe, 0x07, 0xc2];
        let addr = BtAddress::new(raw);
        let parsed = BtAddress::from_string(addr.to_string()).unwrap();
        assert_eq!(parsed.to_byte_arr(), raw);
    }

    #[test]
    fn round_trip_canonicalizes_to_uppercase() {
        let parsed = BtAddress::from_string("ab:cd:ef:01:23:45").unwrap();
        assert_eq!(parsed.to_string(), "AB:CD:EF:01:23:45");
        assert_eq!(parsed.to_string().len(), 17);
    }
}
