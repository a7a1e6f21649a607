use rle_codec::config::Method;
use rle_codec::pipeline;

fn main() {
	let data = b"aaaaaaaaaaaabbbbbbbbcccdd hello".to_vec();
	for method in [Method::A, Method::B] {
		let mut input = std::io::Cursor::new(&data);
		let mut encoded = Vec::new();
		let stats = pipeline::encode(&mut input, &mut encoded, method).unwrap();
		println!("{:?}: encoded {} -> {} bytes in {} runs", method, stats.original_size, stats.compressed_size, stats.runs);

		let mut enc_cur = std::io::Cursor::new(encoded);
		let mut restored = Vec::new();
		pipeline::decode(&mut enc_cur, &mut restored).unwrap();
		println!("{:?}: restored {} bytes", method, restored.len());
	}
}
