//! Training corpus helpers.

/// Sentences used when the caller provides no usable training data.
pub const DEFAULT_CORPUS: [&str; 3] = [
	"Olá. Eu sou o JARViS, assistente virtual inspirado no filme Homem de Ferro.",
	"Posso gerar frases com base no que você me ensinar.",
	"Forneça exemplos ou faça perguntas, senhor.",
];

/// Builds a training corpus from raw samples.
///
/// Samples are trimmed and blank ones dropped. If nothing is left,
/// `DEFAULT_CORPUS` is returned instead.
pub fn build_corpus<I, S>(samples: I) -> Vec<String>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let corpus: Vec<String> = samples
		.into_iter()
		.map(|s| s.as_ref().trim().to_owned())
		.filter(|s| !s.is_empty())
		.collect();

	if corpus.is_empty() {
		log::debug!("no training samples given, using the default corpus");
		return DEFAULT_CORPUS.iter().map(|s| (*s).to_owned()).collect();
	}
	corpus
}
