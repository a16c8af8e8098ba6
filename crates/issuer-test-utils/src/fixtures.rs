//! Certificate fixtures for key loading tests
//!
//! Three self-signed RSA-2048 certificates with pre-computed JWK values, plus
//! one EC P-256 certificate for the unsupported key type path.

/// A PEM certificate together with the JWK values it must produce.
#[derive(Debug, Clone, Copy)]
pub struct CertFixture {
    /// File name used for this certificate under the default configuration.
    pub file_name: &'static str,
    pub pem: &'static str,
    pub kid: &'static str,
    /// Base64url modulus.
    pub n: &'static str,
    /// Base64 (standard) DER certificate, the single `x5c` entry.
    pub x5c: &'static str,
    pub x5t: &'static str,
    pub x5t_s256: &'static str,
    /// PEM body of the SubjectPublicKeyInfo with headers and newlines removed.
    pub public_key: &'static str,
}

/// Exponent shared by all RSA fixtures (65537).
pub const RSA_EXPONENT: &str = "AQAB";

pub const NEXT: CertFixture = CertFixture {
    file_name: "next-tls.crt",
    pem: include_str!("../fixtures/next-tls.crt"),
    kid: "issuer-key-2025-03",
    n: "mrN-PyxusPaAXclD1Og6A4FKnWC_oK2D5IoCURTs6bSsiJezgmAkQSCHcqsIuLJpksxcGyWRE8fhW4VNGxvzFCXBzTzRispm8ExP9GfFNp8gF14ZDfTteQSZqRzrYwhdoaRpDXfJQUnvgOCIVcnJi-tBCcf7TYmeRXIpU4teJPFrKVkb1DLnTPnoUmeDWMietg1PeKluJxVpocOt0vlnpvCtQmM63K1ShnR3a7cqqJnG5lJz7AdeaGfF2Xe_zjdRvYeR1m-cyEt-1-MgjZkwyXglMHOeUdNJV5ekL59_C0YAkmTyp6Sn5QZdT6Z5NrD1jwSGH0zVlDudl8833ui7Hw",
    x5c: "MIIC4TCCAcmgAwIBAgIUTXUqYpCNgcNca+OUOsnIPztEQi0wDQYJKoZIhvcNAQELBQAwADAeFw0yNTA0MTExMzE4MzlaFw0yODAxMDYxMzE4MzlaMAAwggEiMA0GCSqGSIb3DQEBAQUAA4IBDwAwggEKAoIBAQCas34/LG6w9oBdyUPU6DoDgUqdYL+grYPkigJRFOzptKyIl7OCYCRBIIdyqwi4smmSzFwbJZETx+FbhU0bG/MUJcHNPNGKymbwTE/0Z8U2nyAXXhkN9O15BJmpHOtjCF2hpGkNd8lBSe+A4IhVycmL60EJx/tNiZ5FcilTi14k8WspWRvUMudM+ehSZ4NYyJ62DU94qW4nFWmhw63S+Wem8K1CYzrcrVKGdHdrtyqomcbmUnPsB15oZ8XZd7/ON1G9h5HWb5zIS37X4yCNmTDJeCUwc55R00lXl6Qvn38LRgCSZPKnpKflBl1Ppnk2sPWPBIYfTNWUO52Xzzfe6LsfAgMBAAGjUzBRMB0GA1UdDgQWBBRX7APTzRcA4uTnGFzl6IxF1uDNizAfBgNVHSMEGDAWgBRX7APTzRcA4uTnGFzl6IxF1uDNizAPBgNVHRMBAf8EBTADAQH/MA0GCSqGSIb3DQEBCwUAA4IBAQA4cc5/OrC3hUJg9NSdeHcQhBvZefWdAxxOtKQqw3kr7+aYu5YyBb1nVtzsi7wBEAqdhWefZSqjXs6pz4kZa7f78za1+6JUD34TCOKItR3kmSFSc6g3yysgKF9DbeeJz663c8xIwUhkCqJxfjMfLcmTouRbA4qmrQXLaGiQes1dQFLf9ftOs5iRJ0znP+aVl4dfPrsmmpw7pC2M27p8R5dXpfxAzSoRGXOD1zOd7rfRvb50m351AtlRnt5/Qv5ueZU6aXj+4DxcuLwVCCKiENpAoK4rSyt7LamwGS8u8xssjVmwP+XS7+lHz/Pvc6qTofckZd+Dro7oNB/P3rA0t8iH",
    x5t: "33eaQDdpm1muofcpGADFWOBOVEo",
    x5t_s256: "9dvy1q-_kHs7wok0Yo0X0Trkc2MBnNlTeIoB_yjpvqk",
    public_key: "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAmrN+PyxusPaAXclD1Og6A4FKnWC/oK2D5IoCURTs6bSsiJezgmAkQSCHcqsIuLJpksxcGyWRE8fhW4VNGxvzFCXBzTzRispm8ExP9GfFNp8gF14ZDfTteQSZqRzrYwhdoaRpDXfJQUnvgOCIVcnJi+tBCcf7TYmeRXIpU4teJPFrKVkb1DLnTPnoUmeDWMietg1PeKluJxVpocOt0vlnpvCtQmM63K1ShnR3a7cqqJnG5lJz7AdeaGfF2Xe/zjdRvYeR1m+cyEt+1+MgjZkwyXglMHOeUdNJV5ekL59/C0YAkmTyp6Sn5QZdT6Z5NrD1jwSGH0zVlDudl8833ui7HwIDAQAB",
};

pub const ACTIVE: CertFixture = CertFixture {
    file_name: "tls.crt",
    pem: include_str!("../fixtures/tls.crt"),
    kid: "issuer-key-2025-02",
    n: "y0skyMX46fzroq2Ma2pr1iP-Rt-x3IKufm6rf54vwcq_jxYPBajNREM0dtKfjj1p590Gme1-QQW3uS03eK5Rp5CNGGonFrzWsqlYa3dYgHpcZ6UgFGBPJvJCqBnEFP3d7zdg4GKOGDGv-KEM49bKm1qfIvxJ-JpATzv06vNptsGrtygol1rVbWkq8cFZ5mIzSe3Jk0vx8tw3rEint4uG8OHNWqfdHBKblTVjuW2w6cYr7gk6ujm9FswjkZ5us0mgBekw0prLK5bYwNzHERdFtvaCvOIwNZvqwsETQFpQFBwB_7kdEFfuSHbDeG0Mg5_aIikKom2TV-bEy21V6Sw_1Q",
    x5c: "MIIC4TCCAcmgAwIBAgIUPmDMG0Hiqo2+DSBWFqRvk6p7SZswDQYJKoZIhvcNAQELBQAwADAeFw0yNTA0MTExMzI0MTRaFw0yODAxMDYxMzI0MTRaMAAwggEiMA0GCSqGSIb3DQEBAQUAA4IBDwAwggEKAoIBAQDLSyTIxfjp/OuirYxramvWI/5G37Hcgq5+bqt/ni/Byr+PFg8FqM1EQzR20p+OPWnn3QaZ7X5BBbe5LTd4rlGnkI0YaicWvNayqVhrd1iAelxnpSAUYE8m8kKoGcQU/d3vN2DgYo4YMa/4oQzj1sqbWp8i/En4mkBPO/Tq82m2wau3KCiXWtVtaSrxwVnmYjNJ7cmTS/Hy3DesSKe3i4bw4c1ap90cEpuVNWO5bbDpxivuCTq6Ob0WzCORnm6zSaAF6TDSmssrltjA3McRF0W29oK84jA1m+rCwRNAWlAUHAH/uR0QV+5IdsN4bQyDn9oiKQqibZNX5sTLbVXpLD/VAgMBAAGjUzBRMB0GA1UdDgQWBBThjgw4oMINmiRhVhjf1fKmFSkYkTAfBgNVHSMEGDAWgBThjgw4oMINmiRhVhjf1fKmFSkYkTAPBgNVHRMBAf8EBTADAQH/MA0GCSqGSIb3DQEBCwUAA4IBAQBMcu0NfhHMGV2JvUggDXoX5ws3RVtRS353n/JFtuF+ngH9zQgPb1NL/2MYe811Mp7mR399xdyfCHSglZ0uLsMIKZ6hyBCxvy9bLGrlLTQzC/azXyiegk+Q4vABXftSJ7x0a0H+zlDBdkYoda99Mcx4igJE3tpdeyTYpBZXhCcI6U6ZB0Ck/Wf/z36ncw7nEP0rCABV+cTtlJGPLhnU8AQpHvOSvSnRlC8hzSZX+n6+im7gRlegpBwtLy4KmThWYdcdnu/3o68iKeSJgykL/w16u3Uc/aYjBf2VwhJmNKmeRn2FMzY+kxr7MoVXV2a91mtM+t5WfvIK9jZL/11i2ZMG",
    x5t: "Zilf2ZAyRv8IUWg7qZm6BdLjFFc",
    x5t_s256: "b1uYMHKFL1TZeYlC3F6VUH8ApjCf401m_cGCMsxvFlU",
    public_key: "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAy0skyMX46fzroq2Ma2pr1iP+Rt+x3IKufm6rf54vwcq/jxYPBajNREM0dtKfjj1p590Gme1+QQW3uS03eK5Rp5CNGGonFrzWsqlYa3dYgHpcZ6UgFGBPJvJCqBnEFP3d7zdg4GKOGDGv+KEM49bKm1qfIvxJ+JpATzv06vNptsGrtygol1rVbWkq8cFZ5mIzSe3Jk0vx8tw3rEint4uG8OHNWqfdHBKblTVjuW2w6cYr7gk6ujm9FswjkZ5us0mgBekw0prLK5bYwNzHERdFtvaCvOIwNZvqwsETQFpQFBwB/7kdEFfuSHbDeG0Mg5/aIikKom2TV+bEy21V6Sw/1QIDAQAB",
};

pub const PREVIOUS: CertFixture = CertFixture {
    file_name: "prev-tls.crt",
    pem: include_str!("../fixtures/prev-tls.crt"),
    kid: "issuer-key-2025-01",
    n: "4nuBr5l7UtS5X-aRMG5_XNtQDvz-NddyCdnAcbquMpx8WEHDRtj47kDmeb01tvrWqZNgrRyQnDl1xQ5qkV0BXoS7n_iUWtrgxJYfprIqHoEFFclugLQiyzbKkez4Y6gw0Zaz7bbB5FRbBKc4Md0DOmJXn-m-6smu5--6FkUixjXZi24YZSVIYjpDxiJpVJmVotaTrOX615VWolk9wdJ0d6dKfIim9YdMFPgJbiLsHL3wi64m8D8TqzXzJynwED4mAW-CKnPp9ueSsQLkVZLMAYmqGt8upsTe046j9y73BVxR_-YwJ7utOkiD2C3jGL_6ex4WBIhEedAC2dO4sBrELw",
    x5c: "MIIC4TCCAcmgAwIBAgIUUXNbl9Vgby/oKY1Bqyz5nAFiUEkwDQYJKoZIhvcNAQELBQAwADAeFw0yNTA0MTExMzIyMTZaFw0yODAxMDYxMzIyMTZaMAAwggEiMA0GCSqGSIb3DQEBAQUAA4IBDwAwggEKAoIBAQDie4GvmXtS1Llf5pEwbn9c21AO/P4113IJ2cBxuq4ynHxYQcNG2PjuQOZ5vTW2+tapk2CtHJCcOXXFDmqRXQFehLuf+JRa2uDElh+msioegQUVyW6AtCLLNsqR7PhjqDDRlrPttsHkVFsEpzgx3QM6Ylef6b7qya7n77oWRSLGNdmLbhhlJUhiOkPGImlUmZWi1pOs5frXlVaiWT3B0nR3p0p8iKb1h0wU+AluIuwcvfCLribwPxOrNfMnKfAQPiYBb4Iqc+n255KxAuRVkswBiaoa3y6mxN7TjqP3LvcFXFH/5jAnu606SIPYLeMYv/p7HhYEiER50ALZ07iwGsQvAgMBAAGjUzBRMB0GA1UdDgQWBBRY7HmChVPSIqHSPwdEZ9qP5hW1pTAfBgNVHSMEGDAWgBRY7HmChVPSIqHSPwdEZ9qP5hW1pTAPBgNVHRMBAf8EBTADAQH/MA0GCSqGSIb3DQEBCwUAA4IBAQA7wNOb93eMXpbu0GqTugeK9C1+4R3lfZMauuPNMdZk0ylhzvS9uRMcfre18hWJuWBykap+8vKIVs/Ia611rPP5ye+jzhJ4MUt/G8Jf9eEbgmF3wKKuCItI4tN0plLRPntqgPz/uTi/pwDovOV/meytmIP+hZ7kN3r2soOHhqtSVYbFpKmMpfu8mRGTCBMJt7Hv6d/tNFcAJkFb/Y0m48Eci5n5Doe9pjrRWOHVeJnnF3wSlETm7WNbgpkreXrG8wFx9/iZgirZ40WDiwHVPxen2piI+esCienCWb1clBmT1gPh6DC+zNHm7F1bbJWLKonFpCyO5gZegL+85uV4bDFG",
    x5t: "ClJICZjMGGZ2XbEHsPsqhNJq4b4",
    x5t_s256: "MbjFiLW3TEVuUkIFDlQe8QSs0TQ_ofwSppNTtn-pIi0",
    public_key: "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA4nuBr5l7UtS5X+aRMG5/XNtQDvz+NddyCdnAcbquMpx8WEHDRtj47kDmeb01tvrWqZNgrRyQnDl1xQ5qkV0BXoS7n/iUWtrgxJYfprIqHoEFFclugLQiyzbKkez4Y6gw0Zaz7bbB5FRbBKc4Md0DOmJXn+m+6smu5++6FkUixjXZi24YZSVIYjpDxiJpVJmVotaTrOX615VWolk9wdJ0d6dKfIim9YdMFPgJbiLsHL3wi64m8D8TqzXzJynwED4mAW+CKnPp9ueSsQLkVZLMAYmqGt8upsTe046j9y73BVxR/+YwJ7utOkiD2C3jGL/6ex4WBIhEedAC2dO4sBrELwIDAQAB",
};

/// Self-signed EC P-256 certificate. Not usable as an RS256 signing key.
pub const EC_CERT_PEM: &str = include_str!("../fixtures/ec-tls.crt");
