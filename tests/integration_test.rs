use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rle_codec::config::{Method, RleConfig};
use rle_codec::{decode_data, encode_data, pipeline, RleError};
use std::fs;
use tempfile::TempDir;

fn random_runs(rng: &mut StdRng, len: usize) -> Vec<u8> {
	let mut data = Vec::with_capacity(len);
	while data.len() < len {
		let value = rng.gen_range(0..4u8);
		let run = rng.gen_range(1..600usize);
		data.extend(std::iter::repeat(value).take(run.min(len - data.len())));
	}
	data
}

#[test]
fn round_trip_random_buffers() {
	let mut rng = StdRng::seed_from_u64(0x5eed);
	for len in [0usize, 1, 2, 254, 255, 256, 509, 510, 511, 4096, 50_000] {
		let runs = random_runs(&mut rng, len);
		let noise: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
		for data in [&runs, &noise] {
			for method in [Method::A, Method::B] {
				let encoded = encode_data(data, method).unwrap();
				assert_eq!(encoded[0], method.tag());
				assert_eq!(&decode_data(&encoded).unwrap(), data, "len {} {:?}", len, method);
			}
		}
	}
}

#[test]
fn round_trip_files() {
	let dir = TempDir::new().unwrap();
	let input = dir.path().join("data.bin");
	let mut data = vec![0u8; 1000];
	data.extend_from_slice(b"some text in the middle");
	data.extend(vec![0xffu8; 777]);
	fs::write(&input, &data).unwrap();

	for method in [Method::A, Method::B] {
		let encoded = dir.path().join(format!("data.{:?}.rle", method));
		let restored = dir.path().join(format!("data.{:?}.out", method));
		let config = RleConfig::default().with_method(method);

		let stats = pipeline::encode_file(&input, &encoded, &config).unwrap();
		assert_eq!(stats.original_size, data.len() as u64);
		assert_eq!(stats.compressed_size, fs::metadata(&encoded).unwrap().len());

		let decoded = pipeline::decode_file(&encoded, &restored, &config).unwrap();
		assert_eq!(decoded.method, method);
		assert_eq!(fs::read(&restored).unwrap(), data);
	}
}

#[test]
fn existing_output_requires_overwrite() {
	let dir = TempDir::new().unwrap();
	let input = dir.path().join("in.bin");
	let output = dir.path().join("out.rle");
	fs::write(&input, b"aaaabbb").unwrap();
	fs::write(&output, b"keep me").unwrap();

	let err = pipeline::encode_file(&input, &output, &RleConfig::default()).unwrap_err();
	assert!(matches!(err, RleError::AlreadyExists(ref p) if *p == output));
	assert_eq!(fs::read(&output).unwrap(), b"keep me");

	let config = RleConfig::default().with_overwrite(true);
	pipeline::encode_file(&input, &output, &config).unwrap();
	assert_eq!(fs::read(&output).unwrap(), vec![0x21, 4, b'a', 3, b'b']);
}

#[test]
fn unknown_tag_creates_no_output() {
	let dir = TempDir::new().unwrap();
	let input = dir.path().join("bogus.rle");
	let output = dir.path().join("bogus.out");
	fs::write(&input, [0x00u8, 3, b'x']).unwrap();

	let err = pipeline::decode_file(&input, &output, &RleConfig::default()).unwrap_err();
	assert!(matches!(err, RleError::UnknownFormat(0x00)));
	assert!(!output.exists());
}

#[test]
fn truncated_stream_removes_partial_output() {
	let dir = TempDir::new().unwrap();
	let input = dir.path().join("short.rle");
	let output = dir.path().join("short.out");
	fs::write(&input, [0x21u8, 3, b'x', 9]).unwrap();

	let err = pipeline::decode_file(&input, &output, &RleConfig::default()).unwrap_err();
	assert!(matches!(err, RleError::TruncatedStream { method: Some(Method::A), offset: 3 }));
	assert!(!output.exists());
}

#[test]
fn missing_input_is_io_error() {
	let dir = TempDir::new().unwrap();
	let output = dir.path().join("never.rle");
	let err = pipeline::encode_file(dir.path().join("missing"), &output, &RleConfig::default()).unwrap_err();
	assert!(matches!(err, RleError::Io(_)));
	assert!(!output.exists());
}

#[test]
fn methods_differ_in_size_but_agree_on_content() {
	let data = b"abcabcabc".repeat(20);
	let a = encode_data(&data, Method::A).unwrap();
	let b = encode_data(&data, Method::B).unwrap();
	assert_eq!(a.len(), 1 + 2 * data.len());
	assert_eq!(b.len(), 1 + data.len());
	assert_eq!(decode_data(&a).unwrap(), decode_data(&b).unwrap());
}
