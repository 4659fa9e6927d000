#![no_main]

use libfuzzer_sys::fuzz_target;
use unparser::emitter::EmitConfig;
use unparser::equivalence::{RubyParser, Verdict, Verifier, VerifyError};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let verifier = Verifier::new(RubyParser, EmitConfig::canonical());
    match verifier.verify_source(source) {
        // Unparsable input and unsupported trees are fine; bad output is not.
        Ok(Verdict::Equivalent { .. }) | Err(VerifyError::Parse(_)) | Err(VerifyError::Emit(_)) => {}
        Ok(Verdict::Mismatch(mismatch)) => panic!("round trip mismatch:\n{}", mismatch.diff),
        Err(VerifyError::Reparse { generated, errors }) => {
            panic!("emitted source does not parse: {generated:?}\n{errors:?}")
        }
        Err(VerifyError::Preprocess(e)) => panic!("normalization failed: {e}"),
    }
});
