use record_codec::{from_bytes, marshal};
use record_codec_macros::record;

record! {
    #[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
    pub struct Inner {
        pub a: u16,
        pub b: [u8; 2],
    }
}

record! {
    #[derive(Debug, Default, Clone, Eq, PartialEq)]
    pub struct Outer {
        pub first: Inner,
        pub second: Inner,
        pub rest: Vec<u8>,
    }
}

fn main() {
    let outer = Outer {
        first: Inner { a: 0x0201, b: [3, 4] },
        second: Inner { a: 0x0605, b: [7, 8] },
        rest: vec![9],
    };
    let bytes = marshal(&outer).unwrap();
    assert_eq!(bytes, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(from_bytes::<Outer>(&bytes).unwrap(), (outer, 9));
}
