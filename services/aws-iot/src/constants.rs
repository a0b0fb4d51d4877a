// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Signing algorithm and scope terminator.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";
pub const AWS4_REQUEST: &str = "aws4_request";

/// Service name that AWS IoT data plane endpoints are signed for.
pub const IOT_DATA_SERVICE: &str = "iotdata";

// Headers used in aws iot requests.
pub const HOST: &str = "host";
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const AUTHORIZATION: &str = "authorization";

// Query parameter selecting a named shadow.
pub const SHADOW_NAME_QUERY: &str = "name";

// Env values used by the iot publisher.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_IOT_ENDPOINT: &str = "AWS_IOT_ENDPOINT";
pub const AWS_IOT_DEVICE_REF: &str = "AWS_IOT_DEVICE_REF";
pub const AWS_IOT_SHADOW_NAME: &str = "AWS_IOT_SHADOW_NAME";

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
///
/// Used for query values: every byte except 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static AWS_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');


/// AsciiSet for AWS UriEncode of paths: like [`AWS_QUERY_ENCODE_SET`] but keeps `/`.
pub static AWS_PATH_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
