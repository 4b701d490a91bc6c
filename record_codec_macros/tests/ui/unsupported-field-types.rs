use record_codec::{marshal, EncodeError};
use record_codec_macros::record;

record! {
    pub struct Unsupported {
        pub ratio: f32,
        pub name: String,
        pub words: [u16; 4],
    }
}

fn main() {
    let value = Unsupported { ratio: 0.5, name: String::from("LAB"), words: [0; 4] };
    match marshal(&value) {
        Err(EncodeError::UnsupportedKind(kind)) => assert_eq!(kind, "f32"),
        other => panic!("unexpected result: {other:?}"),
    }
}
